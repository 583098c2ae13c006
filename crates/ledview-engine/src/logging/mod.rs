//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only ever talks to the
//! `log` facade; the host decides whether to install `env_logger` through
//! [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
