//! Logging utilities.
//!
//! The crate logs through the standard `log` facade; this module owns the
//! one-time `env_logger` initialization for hosts that do not bring their
//! own backend.

mod init;

pub use init::{LoggingConfig, init_logging};
