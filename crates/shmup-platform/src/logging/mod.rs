//! Logging setup.
//!
//! The crate only talks to the `log` facade; this module wires up the
//! `env_logger` backend for hosts that want one.

mod init;

pub use init::{init_logging, LoggingConfig};
