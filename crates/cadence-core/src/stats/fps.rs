/// Width of one measurement window, in milliseconds.
const WINDOW_MS: f64 = 500.0;

/// Windowed frame-rate measurement.
///
/// Frames are counted into ~500 ms windows. The first window is discarded as
/// warm-up so startup hitching does not skew the first reading. A reading
/// within `tolerance` of the nominal rate snaps to it, keeping the display
/// steady under negligible scheduler noise.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    /// Start of the current window; `None` while warming up.
    window_start: Option<f64>,
    frames: u64,
    measured: Option<f64>,
    nominal: f64,
    tolerance: f64,
}

impl FpsMeter {
    pub fn new(nominal: f64, tolerance: f64) -> Self {
        Self {
            window_start: None,
            frames: 0,
            measured: None,
            nominal,
            tolerance,
        }
    }

    /// Counts one frame at timestamp `now` (ms), closing the window when it
    /// has run long enough.
    pub fn tick(&mut self, now: f64) {
        self.frames += 1;
        let elapsed = now - self.window_start.unwrap_or(0.0);
        if elapsed > WINDOW_MS {
            if self.window_start.is_some() {
                let mut fps = (self.frames as f64 / (elapsed / 1000.0)).floor();
                if (fps - self.nominal).abs() <= self.tolerance {
                    fps = self.nominal;
                }
                self.measured = Some(fps);
            }
            self.window_start = Some(now);
            self.frames = 0;
        }
    }

    /// Last completed measurement; `None` until the first full window closes.
    pub fn current(&self) -> Option<f64> {
        self.measured
    }

    /// Display string: `"60 FPS"`, or `"-- FPS"` while unmeasured.
    pub fn display(&self) -> String {
        match self.measured {
            Some(fps) => format!("{fps:.0} FPS"),
            None => "-- FPS".to_string(),
        }
    }

    /// Forgets the current window and measurement; used on resume so the
    /// paused gap never counts as a window.
    pub fn reset(&mut self) {
        self.window_start = None;
        self.frames = 0;
        self.measured = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_window_produces_no_measurement() {
        let mut meter = FpsMeter::new(60.0, 1.0);
        meter.tick(600.0);
        assert_eq!(meter.current(), None);
        assert_eq!(meter.display(), "-- FPS");
    }

    #[test]
    fn near_nominal_reading_snaps() {
        let mut meter = FpsMeter::new(60.0, 1.0);
        meter.tick(600.0); // warm-up window closes here

        // 30 frames over 504 ms -> floor(59.5) = 59, within tolerance of 60.
        for k in 1..=30 {
            meter.tick(600.0 + 16.8 * k as f64);
        }
        assert_eq!(meter.current(), Some(60.0));
        assert_eq!(meter.display(), "60 FPS");
    }

    #[test]
    fn slow_rate_is_reported_unsnapped() {
        let mut meter = FpsMeter::new(60.0, 1.0);
        meter.tick(600.0);

        // 26 frames over 520 ms -> 50 FPS, far from nominal.
        for k in 1..=26 {
            meter.tick(600.0 + 20.0 * k as f64);
        }
        assert_eq!(meter.current(), Some(50.0));
    }

    #[test]
    fn reset_clears_measurement_and_window() {
        let mut meter = FpsMeter::new(60.0, 1.0);
        meter.tick(600.0);
        for k in 1..=26 {
            meter.tick(600.0 + 20.0 * k as f64);
        }
        assert!(meter.current().is_some());

        meter.reset();
        assert_eq!(meter.current(), None);

        // The window after a reset is warm-up again.
        meter.tick(2000.0);
        assert_eq!(meter.current(), None);
    }
}
