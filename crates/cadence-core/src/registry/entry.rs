use crate::sched::UpdateCtx;

/// Boxed update callback.
///
/// Invoked with the clamped elapsed delta (ms), the entry's own options, and
/// a re-entrancy context for buffered registry mutation.
pub(crate) type UpdateFn = Box<dyn FnMut(f64, &UpdateOptions, &mut UpdateCtx) -> Control>;

/// Opaque handle to a registered entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UpdateId(u64);

impl UpdateId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// What a callback wants done with its registration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Control {
    /// Stay registered.
    #[default]
    Keep,
    /// Remove this entry after the current pass.
    Remove,
}

/// Scheduling options for one entry.
///
/// `time` and `fps` both express the invocation interval; `time` wins when
/// present. With neither, the entry fires every tick.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Interval between invocations, in milliseconds.
    pub time: Option<f64>,
    /// Interval expressed as a rate; consulted only when `time` is absent.
    pub fps: Option<f64>,
    /// Remove the entry after its first invocation.
    pub once: bool,
    /// Cost-accounting category for the percentage report.
    pub percent: Option<String>,
}

impl UpdateOptions {
    /// Fires on every tick.
    pub fn every_tick() -> Self {
        Self::default()
    }

    /// Fires once at least `ms` milliseconds have accumulated.
    pub fn every_ms(ms: f64) -> Self {
        Self {
            time: Some(ms),
            ..Self::default()
        }
    }

    /// Fires at the given rate (`1000 / fps` milliseconds apart).
    pub fn at_fps(fps: f64) -> Self {
        Self {
            fps: Some(fps),
            ..Self::default()
        }
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn percent(mut self, name: impl Into<String>) -> Self {
        self.percent = Some(name.into());
        self
    }

    /// Resolved interval in milliseconds. Zero means every tick.
    pub(crate) fn duration(&self) -> f64 {
        match (self.time, self.fps) {
            (Some(ms), _) => ms,
            (None, Some(fps)) if fps > 0.0 => 1000.0 / fps,
            _ => 0.0,
        }
    }
}

/// One registered callback plus its scheduling state.
pub(crate) struct Entry {
    pub(crate) id: UpdateId,
    pub(crate) callback: UpdateFn,
    pub(crate) options: UpdateOptions,
    /// Resolved interval in ms; zero fires every tick.
    pub(crate) duration: f64,
    /// Milliseconds accumulated since the entry last fired.
    pub(crate) elapsed: f64,
    pub(crate) once: bool,
    /// Per-entry pause, independent of the global pause. Internal only.
    pub(crate) paused: bool,
}

impl Entry {
    pub(crate) fn new(id: UpdateId, callback: UpdateFn, options: UpdateOptions) -> Self {
        let duration = options.duration();
        let once = options.once;
        Self {
            id,
            callback,
            options,
            duration,
            elapsed: 0.0,
            once,
            paused: false,
        }
    }
}
