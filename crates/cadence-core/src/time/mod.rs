//! Time subsystem.
//!
//! Millisecond timestamps for the dispatch loop, decoupled from any host API:
//! - [`MonotonicClock`] for wall-clock hosts
//! - [`ManualClock`] for tests and deterministic simulation

mod clock;

pub use clock::{ManualClock, MonotonicClock};
