//! Host environment capability.
//!
//! The dispatch loop consumes exactly two environment primitives: a monotonic
//! clock and a way to ask for the next frame. Both are injected through the
//! [`Host`] trait so the scheduling logic can be driven by a real frame
//! callback, a timer, or a test harness without changing.
//!
//! Visibility is not part of the trait: hosts collapse their own signals
//! (focus/blur, page show/hide, document visibility) into a
//! [`VisibilityEvent`] and push it into the loop.

use crate::time::{ManualClock, MonotonicClock};

/// Environment primitives consumed by the dispatch loop.
pub trait Host {
    /// Monotonic timestamp, in milliseconds.
    fn now_ms(&mut self) -> f64;

    /// Asks the environment to drive the loop's `update` again on the next
    /// frame.
    fn request_frame(&mut self);
}

/// Visibility transition reported by the host environment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// The application lost visibility or focus.
    Hidden,
    /// The application became visible or regained focus.
    Visible,
}

/// Wall-clock host with a frame-request latch.
///
/// Frame requests are not scheduled anywhere; they are latched for a polling
/// driver to consume via [`take_frame_request`](StdHost::take_frame_request).
#[derive(Debug, Default)]
pub struct StdHost {
    clock: MonotonicClock,
    frame_requested: bool,
}

impl StdHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the pending frame request.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }
}

impl Host for StdHost {
    fn now_ms(&mut self) -> f64 {
        self.clock.now_ms()
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}

/// Simulated host: a [`ManualClock`] plus a frame-request counter.
///
/// Intended for tests and offline simulation; ticks happen exactly when the
/// caller invokes `update`, time moves exactly when the caller advances it.
#[derive(Debug, Default)]
pub struct ManualHost {
    clock: ManualClock,
    frames_requested: u64,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: ManualClock) -> Self {
        Self {
            clock,
            frames_requested: 0,
        }
    }

    /// A handle sharing this host's time.
    pub fn clock(&self) -> ManualClock {
        self.clock.clone()
    }

    /// Total frames the loop has asked for so far.
    pub fn frames_requested(&self) -> u64 {
        self.frames_requested
    }
}

impl Host for ManualHost {
    fn now_ms(&mut self) -> f64 {
        self.clock.now_ms()
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_host_latches_frame_requests() {
        let mut host = StdHost::new();
        assert!(!host.take_frame_request());

        host.request_frame();
        host.request_frame();
        assert!(host.frame_requested());
        assert!(host.take_frame_request());
        assert!(!host.take_frame_request());
    }

    #[test]
    fn manual_host_counts_requests_and_shares_time() {
        let mut host = ManualHost::new();
        let clock = host.clock();

        clock.advance(250.0);
        assert_eq!(host.now_ms(), 250.0);

        host.request_frame();
        host.request_frame();
        assert_eq!(host.frames_requested(), 2);
    }
}
