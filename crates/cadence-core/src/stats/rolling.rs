/// Circular buffer of the most recent timing samples.
///
/// Fills sequentially up to capacity, then the write cursor wraps and
/// overwrites the oldest slot. The mean is taken over however many samples
/// have been collected so far, never over unwritten slots.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: Vec<f64>,
    cursor: usize,
    capacity: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            samples: Vec::new(),
            cursor: 0,
            capacity,
        }
    }

    /// Records one sample, evicting the oldest once the window is full.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() < self.capacity {
            self.samples.push(ms);
        } else {
            self.samples[self.cursor] = ms;
        }
        self.cursor += 1;
        if self.cursor == self.capacity {
            self.cursor = 0;
        }
    }

    /// Mean of the collected samples; zero when none have been recorded.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_means_zero() {
        assert_eq!(RollingWindow::new(4).mean(), 0.0);
    }

    #[test]
    fn partial_fill_averages_collected_samples_only() {
        let mut window = RollingWindow::new(4);
        window.record(2.0);
        window.record(4.0);
        assert_eq!(window.len(), 2);
        assert_eq!(window.mean(), 3.0);
    }

    #[test]
    fn full_window_overwrites_oldest() {
        let mut window = RollingWindow::new(3);
        for v in [1.0, 2.0, 3.0] {
            window.record(v);
        }
        assert_eq!(window.mean(), 2.0);

        // Evicts 1.0; window is now [4.0, 2.0, 3.0].
        window.record(4.0);
        assert_eq!(window.len(), 3);
        assert_eq!(window.mean(), 3.0);
    }
}
