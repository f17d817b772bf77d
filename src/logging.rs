//! Logging utilities for errorkit
//!
//! Re-exports the tracing macros this crate emits through, under log_*
//! naming for consistency.

// Re-export tracing macros with log_* naming
pub use tracing::{debug as log_debug, warn as log_warn};
