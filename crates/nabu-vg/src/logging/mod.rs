//! Logging utilities.
//!
//! Centralizes logger initialization behind the standard `log` facade so
//! library code never touches a concrete logging backend.

mod init;

pub use init::{LoggingConfig, init_logging};
