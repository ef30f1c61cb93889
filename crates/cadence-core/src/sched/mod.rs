//! The dispatch loop and its drivers.
//!
//! [`UpdateLoop`] is host-agnostic: anything implementing
//! [`Host`](crate::host::Host) can drive it one tick at a time.
//! [`run_blocking`] is the built-in driver for plain threads.

mod driver;
mod update_loop;

pub use driver::run_blocking;
pub use update_loop::{UpdateConfig, UpdateCtx, UpdateLoop};
