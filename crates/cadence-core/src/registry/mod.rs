//! Entry registry.
//!
//! Registered callbacks and their scheduling parameters. Dispatch order is
//! insertion order; handles are monotonic ids that are never reused, so a
//! stale handle removes nothing instead of removing the wrong entry.

mod entry;
mod list;

pub use entry::{Control, UpdateId, UpdateOptions};

pub(crate) use entry::{Entry, UpdateFn};
pub(crate) use list::Registry;
