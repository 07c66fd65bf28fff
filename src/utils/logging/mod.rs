//! Logging utilities
//!
//! Consistent log lines for registry construction and row resolution.

pub mod log;

// Re-export commonly used functions for convenience
pub use self::log::{log_dispatch, log_registry_built, log_resolution, log_skipped_factory};
