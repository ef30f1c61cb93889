//! Cost instrumentation.
//!
//! Rolling-average timing buffers per named category ([`CostLedger`]) and a
//! windowed frame-rate measurement ([`FpsMeter`]). Both are pure state
//! machines over caller-supplied timestamps; nothing in here reads a clock.

mod fps;
mod ledger;
mod rolling;

pub use fps::FpsMeter;
pub use ledger::{CostLedger, OTHER_CATEGORY, ROLLING_WINDOW};
pub use rolling::RollingWindow;
