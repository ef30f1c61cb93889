use log::{debug, trace};

use crate::host::{Host, VisibilityEvent};
use crate::registry::{Control, Entry, Registry, UpdateFn, UpdateId, UpdateOptions};
use crate::report::{PanelId, Reporter};
use crate::stats::{CostLedger, FpsMeter};

/// Dispatch loop configuration.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Nominal frame rate the host drives the loop at.
    pub target_fps: f64,

    /// Upper bound on a single tick's elapsed delta, in milliseconds.
    ///
    /// Caps the effect of long stalls (debugger, backgrounded window) so one
    /// catch-up tick cannot fire interval entries many times over or blow up
    /// cost averages.
    pub max_change: f64,

    /// FPS readings within this distance of `target_fps` snap to it.
    pub fps_tolerance: f64,

    /// Report measured FPS and the frame-load meter.
    pub report_fps: bool,
    /// Report the number of entries invoked per tick.
    pub report_count: bool,
    /// Attribute per-entry cost to categories and report percentage shares.
    pub report_percent: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            target_fps: 60.0,
            max_change: 100.0,
            fps_tolerance: 1.0,
            report_fps: false,
            report_count: false,
            report_percent: false,
        }
    }
}

/// Buffered mutation context handed to callbacks during dispatch.
///
/// Registry changes requested here are applied only after the current pass
/// over the registry completes, so iteration never skips or double-visits an
/// entry. An entry added here first runs on the next tick; its id is valid
/// immediately.
pub struct UpdateCtx {
    commands: Vec<Command>,
    next_id: u64,
}

enum Command {
    Add {
        id: UpdateId,
        callback: UpdateFn,
        options: UpdateOptions,
    },
    Remove(UpdateId),
}

impl UpdateCtx {
    fn begin(next_id: u64) -> Self {
        Self {
            commands: Vec::new(),
            next_id,
        }
    }

    /// Queues a new registration; the entry is visible starting next tick.
    pub fn add<F>(&mut self, callback: F, options: UpdateOptions) -> UpdateId
    where
        F: FnMut(f64, &UpdateOptions, &mut UpdateCtx) -> Control + 'static,
    {
        let id = UpdateId::new(self.next_id);
        self.next_id += 1;
        self.commands.push(Command::Add {
            id,
            callback: Box::new(callback),
            options,
        });
        id
    }

    /// Queues removal of any entry, including the calling entry itself.
    pub fn remove(&mut self, id: UpdateId) {
        self.commands.push(Command::Remove(id));
    }

    fn finish(self) -> (Vec<Command>, u64) {
        (self.commands, self.next_id)
    }
}

struct PauseHooks {
    on_pause: Box<dyn FnMut()>,
    on_resume: Box<dyn FnMut()>,
}

#[derive(Debug, Default)]
struct Panels {
    fps: Option<PanelId>,
    meter: Option<PanelId>,
    count: Option<PanelId>,
    percent: Option<PanelId>,
}

/// Frame-driven callback scheduler.
///
/// Owns all scheduler state (registry, clock bookkeeping, instrumentation),
/// so independent loops can coexist and tear down cleanly. The host drives
/// it by calling [`update`](UpdateLoop::update) once per frame; the loop asks
/// for the next frame through the injected [`Host`] unless paused.
pub struct UpdateLoop<H: Host> {
    host: H,
    config: UpdateConfig,
    /// Per-tick dispatch budget, ms (`1000 / target_fps`).
    frame_budget: f64,

    registry: Registry,

    /// Timestamp of the last dispatched tick; `None` before the first one,
    /// which forces `elapsed = 0` on the next dispatch.
    last_update: Option<f64>,
    paused: bool,
    /// Active time between the last tick and the moment of pausing; restored
    /// into the timeline on resume.
    pause_elapsed: f64,
    /// The loop observed the global pause and stopped rescheduling itself.
    suspended: bool,

    pause_hooks: Vec<PauseHooks>,
    on_loop: Option<Box<dyn FnMut(f64)>>,

    stats: CostLedger,
    fps: FpsMeter,
    last_count: Option<usize>,
    reporter: Option<Box<dyn Reporter>>,
    panels: Panels,
}

impl<H: Host> UpdateLoop<H> {
    /// Creates a loop without a reporting collaborator; all instrumentation
    /// flags are inert.
    pub fn new(host: H, config: UpdateConfig) -> Self {
        Self::build(host, config, None)
    }

    /// Creates a loop wired to an external debug panel. Panels are created
    /// up front for each enabled report flag.
    pub fn with_reporter(host: H, config: UpdateConfig, reporter: Box<dyn Reporter>) -> Self {
        Self::build(host, config, Some(reporter))
    }

    fn build(host: H, config: UpdateConfig, mut reporter: Option<Box<dyn Reporter>>) -> Self {
        debug_assert!(config.target_fps > 0.0);
        debug_assert!(config.max_change > 0.0);

        let mut panels = Panels::default();
        if let Some(rep) = reporter.as_deref_mut() {
            if config.report_fps {
                panels.fps = Some(rep.add_panel("FPS"));
                panels.meter = Some(rep.add_panel("frame load"));
            }
            if config.report_count {
                panels.count = Some(rep.add_panel("updates"));
            }
            if config.report_percent {
                panels.percent = Some(rep.add_panel("percentages"));
            }
        }

        let frame_budget = 1000.0 / config.target_fps;
        let fps = FpsMeter::new(config.target_fps, config.fps_tolerance);
        Self {
            host,
            config,
            frame_budget,
            registry: Registry::new(),
            last_update: None,
            paused: false,
            pause_elapsed: 0.0,
            suspended: false,
            pause_hooks: Vec::new(),
            on_loop: None,
            stats: CostLedger::new(),
            fps,
            last_count: None,
            reporter,
            panels,
        }
    }

    /// Registers a callback. Returns a handle usable with
    /// [`remove`](UpdateLoop::remove).
    pub fn add<F>(&mut self, callback: F, options: UpdateOptions) -> UpdateId
    where
        F: FnMut(f64, &UpdateOptions, &mut UpdateCtx) -> Control + 'static,
    {
        self.registry.add(Box::new(callback), options)
    }

    /// Removes an entry. Unknown or already-removed handles are a no-op.
    pub fn remove(&mut self, id: UpdateId) {
        self.registry.remove(id);
    }

    /// Removes every entry and resets cost accounting to the empty `"Other"`
    /// category.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.stats.reset();
        debug!("update loop cleared");
    }

    /// Drives one tick and requests the next frame from the host.
    ///
    /// Call once to start the loop; afterwards the host's per-frame callback
    /// keeps calling it. While globally paused this marks the loop suspended
    /// and does not reschedule; [`resume`](UpdateLoop::resume) restarts it.
    pub fn update(&mut self) {
        if self.paused {
            self.suspended = true;
            trace!("tick skipped: loop paused");
            return;
        }

        let current = self.host.now_ms();
        let elapsed = match self.last_update {
            None => 0.0,
            Some(last) => (current - last).min(self.config.max_change),
        };

        // At the nominal 60 every frame dispatches; slower targets gate on
        // the frame budget so an over-eager host does not over-deliver
        // ticks.
        if self.config.target_fps == 60.0 || elapsed == 0.0 || elapsed >= self.frame_budget {
            if !self.registry.is_empty() {
                let count = self.run_entries(elapsed);
                if self.count_active() {
                    self.report_count(count);
                }
                if self.percent_active() {
                    self.report_percent();
                }
            }
            self.last_update = Some(current);
            if self.fps_active() {
                self.report_fps(current);
            }
        }

        if let Some(hook) = self.on_loop.as_mut() {
            hook(elapsed);
        }
        self.host.request_frame();
    }

    /// One pass over the registry. Returns the number of entries invoked.
    fn run_entries(&mut self, elapsed: f64) -> usize {
        let percent = self.percent_active();
        let mut ctx = UpdateCtx::begin(self.registry.next_id());
        let mut removals: Vec<UpdateId> = Vec::new();
        let mut other_cost = 0.0;
        let mut count = 0usize;

        // The pass iterates a stable prefix: ctx commands are buffered and
        // applied after the pass, so indices cannot shift mid-flight.
        let len = self.registry.len();
        for i in 0..len {
            let entry = self.registry.entry_mut(i);
            if entry.paused {
                continue;
            }
            if entry.duration > 0.0 {
                entry.elapsed += elapsed;
                if entry.elapsed < entry.duration {
                    // A tracked entry that is not due still costs zero this
                    // tick, keeping rolling-average denominators aligned
                    // across categories.
                    if percent {
                        if let Some(name) = entry.options.percent.as_deref() {
                            self.stats.record(name, 0.0);
                        }
                    }
                    continue;
                }
                entry.elapsed = 0.0;
            }

            let id = entry.id;
            let once = entry.once;

            let (control, cost) = if percent {
                let start = self.host.now_ms();
                let Entry {
                    callback, options, ..
                } = &mut *entry;
                let control = callback(elapsed, &*options, &mut ctx);
                (control, self.host.now_ms() - start)
            } else {
                let Entry {
                    callback, options, ..
                } = &mut *entry;
                (callback(elapsed, &*options, &mut ctx), 0.0)
            };

            if percent {
                match entry.options.percent.as_deref() {
                    Some(name) => self.stats.record(name, cost),
                    None => other_cost += cost,
                }
            }

            if once || control == Control::Remove {
                removals.push(id);
            }
            count += 1;
        }

        if percent {
            // One "Other" sample per dispatch, even a zero one, so its
            // window stays in step with the named categories.
            self.stats.record_other(other_cost);
        }

        self.finish_pass(ctx, removals);
        count
    }

    /// Applies removals and buffered ctx commands after a pass.
    fn finish_pass(&mut self, ctx: UpdateCtx, removals: Vec<UpdateId>) {
        for id in removals {
            self.registry.remove(id);
        }
        let (commands, next_id) = ctx.finish();
        self.registry.set_next_id(next_id);
        for command in commands {
            match command {
                Command::Add {
                    id,
                    callback,
                    options,
                } => self.registry.insert(Entry::new(id, callback, options)),
                Command::Remove(id) => self.registry.remove(id),
            }
        }
    }

    /// Pauses the loop and notifies pause hooks. Idempotent.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        let now = self.host.now_ms();
        self.pause_elapsed = now - self.last_update.unwrap_or(now);
        self.suspended = false;
        debug!("update loop paused");
        if self.fps_active() {
            if let (Some(reporter), Some(panel)) = (self.reporter.as_deref_mut(), self.panels.fps)
            {
                reporter.update_text(panel, "-- FPS");
            }
        }
        for hooks in &mut self.pause_hooks {
            (hooks.on_pause)();
        }
    }

    /// Resumes a paused loop, restarting it if it had suspended itself.
    /// Idempotent.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        let now = self.host.now_ms();
        // Rebase the timeline so the next tick sees active time only, not
        // the whole paused gap.
        self.last_update = Some(now - self.pause_elapsed);
        self.fps.reset();
        debug!("update loop resumed");
        for hooks in &mut self.pause_hooks {
            (hooks.on_resume)();
        }
        if self.suspended {
            self.suspended = false;
            self.update();
        }
    }

    /// Registers hooks invoked on pause and resume, in registration order.
    pub fn register_pause<P, R>(&mut self, on_pause: P, on_resume: R)
    where
        P: FnMut() + 'static,
        R: FnMut() + 'static,
    {
        self.pause_hooks.push(PauseHooks {
            on_pause: Box::new(on_pause),
            on_resume: Box::new(on_resume),
        });
    }

    /// Maps a host visibility transition onto pause/resume.
    pub fn visibility_changed(&mut self, event: VisibilityEvent) {
        match event {
            VisibilityEvent::Hidden => self.pause(),
            VisibilityEvent::Visible => self.resume(),
        }
    }

    /// Hook observing every tick (with its clamped elapsed delta) without
    /// registering an entry.
    pub fn set_on_loop<F>(&mut self, hook: F)
    where
        F: FnMut(f64) + 'static,
    {
        self.on_loop = Some(Box::new(hook));
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the loop observed a pause and stopped rescheduling itself.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn contains(&self, id: UpdateId) -> bool {
        self.registry.contains(id)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Per-tick dispatch budget in milliseconds.
    pub fn frame_budget(&self) -> f64 {
        self.frame_budget
    }

    /// Current category cost shares (see [`CostLedger::shares`]).
    pub fn cost_shares(&self) -> Vec<(String, u32)> {
        self.stats.shares()
    }

    /// Last completed FPS measurement, when FPS reporting is active.
    pub fn measured_fps(&self) -> Option<f64> {
        self.fps.current()
    }

    fn percent_active(&self) -> bool {
        self.config.report_percent && self.reporter.is_some()
    }

    fn fps_active(&self) -> bool {
        self.config.report_fps && self.reporter.is_some()
    }

    fn count_active(&self) -> bool {
        self.config.report_count && self.reporter.is_some()
    }

    fn report_fps(&mut self, current: f64) {
        self.fps.tick(current);
        let spent = self.host.now_ms() - current;
        let Some(reporter) = self.reporter.as_deref_mut() else {
            return;
        };
        if let Some(panel) = self.panels.fps {
            reporter.update_text(panel, &self.fps.display());
        }
        if let Some(panel) = self.panels.meter {
            // Share of the frame budget left after this tick's work.
            reporter.update_meter(panel, (self.frame_budget - spent) / self.frame_budget);
        }
    }

    fn report_count(&mut self, count: usize) {
        if self.last_count == Some(count) {
            return;
        }
        self.last_count = Some(count);
        if let (Some(reporter), Some(panel)) = (self.reporter.as_deref_mut(), self.panels.count) {
            reporter.update_text(panel, &format!("{count} updates"));
        }
    }

    fn report_percent(&mut self) {
        let shares = self.stats.shares();
        let (Some(reporter), Some(panel)) = (self.reporter.as_deref_mut(), self.panels.percent)
        else {
            return;
        };
        let mut text = String::new();
        // "Other" sits at index zero and is printed last.
        for (name, share) in shares.iter().skip(1).chain(shares.first()) {
            text.push_str(&format!("{name}: {share}%\n"));
        }
        reporter.update_text(panel, &text);
    }

    #[cfg(test)]
    fn set_entry_paused(&mut self, id: UpdateId, paused: bool) {
        if let Some(entry) = self.registry.entry_by_id_mut(id) {
            entry.paused = paused;
        }
    }

    #[cfg(test)]
    fn ledger(&self) -> &CostLedger {
        &self.stats
    }
}
