use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::host::StdHost;
use crate::sched::UpdateLoop;

/// Drives an [`UpdateLoop`] on the current thread at its frame budget.
///
/// Each iteration ticks the loop, then sleeps out whatever remains of the
/// budget. Returns when `should_exit` says so, or when the loop pauses and
/// stops requesting frames.
pub fn run_blocking<F>(update_loop: &mut UpdateLoop<StdHost>, mut should_exit: F)
where
    F: FnMut(&UpdateLoop<StdHost>) -> bool,
{
    let budget = Duration::from_secs_f64(update_loop.frame_budget() / 1000.0);
    loop {
        if should_exit(update_loop) {
            debug!("driver exiting: exit condition met");
            return;
        }

        let started = Instant::now();
        update_loop.update();

        if !update_loop.host_mut().take_frame_request() {
            debug!("driver exiting: loop suspended");
            return;
        }

        let spent = started.elapsed();
        if spent < budget {
            thread::sleep(budget - spent);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::registry::{Control, UpdateOptions};
    use crate::sched::UpdateConfig;

    #[test]
    fn runs_until_the_exit_condition_holds() {
        let mut updates = UpdateLoop::new(StdHost::new(), UpdateConfig::default());
        let ticks = Rc::new(Cell::new(0u32));
        let inner = Rc::clone(&ticks);
        updates.add(
            move |_, _, _| {
                inner.set(inner.get() + 1);
                Control::Keep
            },
            UpdateOptions::every_tick(),
        );

        run_blocking(&mut updates, |_| ticks.get() >= 3);
        assert!(ticks.get() >= 3);
    }

    #[test]
    fn exits_when_the_loop_suspends() {
        let mut updates = UpdateLoop::new(StdHost::new(), UpdateConfig::default());
        updates.pause();

        // The exit condition never fires; the suspended loop ends the drive.
        run_blocking(&mut updates, |_| false);
        assert!(updates.is_suspended());
    }
}
