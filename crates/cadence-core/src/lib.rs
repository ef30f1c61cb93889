//! Frame-driven callback scheduler.
//!
//! Callbacks register with an [`UpdateLoop`] and run once per frame, every
//! `N` milliseconds, or at a given FPS; the loop accounts elapsed time,
//! pauses and resumes with host visibility, and can attribute per-callback
//! cost to named categories.
//!
//! ```
//! use cadence_core::{Control, ManualHost, UpdateConfig, UpdateLoop, UpdateOptions};
//!
//! let host = ManualHost::new();
//! let clock = host.clock();
//! let mut updates = UpdateLoop::new(host, UpdateConfig::default());
//!
//! updates.add(
//!     |elapsed, _, _| {
//!         println!("{elapsed:.1} ms since the last tick");
//!         Control::Keep
//!     },
//!     UpdateOptions::every_ms(100.0),
//! );
//!
//! updates.update();
//! clock.advance(100.0);
//! updates.update();
//! ```

pub mod host;
pub mod logging;
pub mod registry;
pub mod report;
pub mod sched;
pub mod stats;
pub mod time;

pub use host::{Host, ManualHost, StdHost, VisibilityEvent};
pub use registry::{Control, UpdateId, UpdateOptions};
pub use report::{PanelId, Reporter};
pub use sched::{UpdateConfig, UpdateCtx, UpdateLoop, run_blocking};
pub use time::{ManualClock, MonotonicClock};
