//! System-level modules
//!
//! Logging initialization and other process-level concerns.

pub mod logging;

pub use logging::init_logging;
