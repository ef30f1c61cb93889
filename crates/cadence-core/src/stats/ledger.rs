use super::RollingWindow;

/// Number of samples kept in each category's rolling average.
pub const ROLLING_WINDOW: usize = 500;

/// Implicit category absorbing the cost of entries without one.
pub const OTHER_CATEGORY: &str = "Other";

#[derive(Debug, Clone)]
struct Category {
    name: String,
    window: RollingWindow,
}

/// Per-category cost accounting with rounded percentage shares.
///
/// Categories keep insertion order; [`OTHER_CATEGORY`] is always present at
/// index zero. Named categories are created lazily on their first recorded
/// sample.
#[derive(Debug, Clone)]
pub struct CostLedger {
    categories: Vec<Category>,
}

impl CostLedger {
    pub fn new() -> Self {
        let mut ledger = Self {
            categories: Vec::new(),
        };
        ledger.reset();
        ledger
    }

    /// Drops all categories and recreates the empty `"Other"` bucket.
    pub fn reset(&mut self) {
        self.categories.clear();
        self.categories.push(Category {
            name: OTHER_CATEGORY.to_string(),
            window: RollingWindow::new(ROLLING_WINDOW),
        });
    }

    /// Records a sample for `name`, creating the category on first use.
    pub fn record(&mut self, name: &str, ms: f64) {
        if let Some(category) = self.categories.iter_mut().find(|c| c.name == name) {
            category.window.record(ms);
        } else {
            let mut window = RollingWindow::new(ROLLING_WINDOW);
            window.record(ms);
            self.categories.push(Category {
                name: name.to_string(),
                window,
            });
        }
    }

    /// Records this tick's accumulated cost of uncategorized entries.
    pub fn record_other(&mut self, ms: f64) {
        self.categories[0].window.record(ms);
    }

    /// Share of total mean cost per category, as rounded percentages, in
    /// insertion order (`"Other"` first).
    ///
    /// A zero grand total reports 100 for every category rather than
    /// dividing by zero; it means nothing measurable has been recorded yet.
    pub fn shares(&self) -> Vec<(String, u32)> {
        let means: Vec<f64> = self.categories.iter().map(|c| c.window.mean()).collect();
        let total: f64 = means.iter().sum();
        self.categories
            .iter()
            .zip(means)
            .map(|(category, mean)| {
                let share = if total > 0.0 {
                    (mean / total * 100.0).round() as u32
                } else {
                    100
                };
                (category.name.clone(), share)
            })
            .collect()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    #[cfg(test)]
    pub(crate) fn sample_count(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.window.len())
    }
}

impl Default for CostLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_are_normalized_means() {
        let mut ledger = CostLedger::new();
        ledger.record("movement", 3.0);
        ledger.record("render", 1.0);
        ledger.record_other(0.0);

        let shares = ledger.shares();
        assert_eq!(
            shares,
            vec![
                (OTHER_CATEGORY.to_string(), 0),
                ("movement".to_string(), 75),
                ("render".to_string(), 25),
            ]
        );
    }

    #[test]
    fn zero_total_reports_full_share_for_everyone() {
        let mut ledger = CostLedger::new();
        ledger.record("idle", 0.0);
        ledger.record_other(0.0);

        for (_, share) in ledger.shares() {
            assert_eq!(share, 100);
        }
    }

    #[test]
    fn reset_leaves_only_an_empty_other() {
        let mut ledger = CostLedger::new();
        ledger.record("movement", 3.0);
        ledger.record_other(1.0);
        assert_eq!(ledger.category_count(), 2);

        ledger.reset();
        assert_eq!(ledger.category_count(), 1);
        assert_eq!(ledger.sample_count(OTHER_CATEGORY), Some(0));
        assert_eq!(ledger.shares(), vec![(OTHER_CATEGORY.to_string(), 100)]);
    }

    #[test]
    fn mean_uses_rolling_window_per_category() {
        let mut ledger = CostLedger::new();
        ledger.record("movement", 2.0);
        ledger.record("movement", 4.0);
        ledger.record_other(1.0);
        ledger.record_other(1.0);

        // movement mean 3.0, Other mean 1.0 -> 75% / 25%.
        let shares = ledger.shares();
        assert_eq!(shares[0], (OTHER_CATEGORY.to_string(), 25));
        assert_eq!(shares[1], ("movement".to_string(), 75));
    }
}
