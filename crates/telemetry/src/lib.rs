//! Logging setup for the RATP accessibility tools.

pub mod logging;

pub use logging::{init_logging, LogGuard};
