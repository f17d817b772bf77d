//! # errorkit
//!
//! Typed error taxonomy with ambient provenance tagging and deterministic
//! classification of opaque failures.
//!
//! ## Key Features
//!
//! - **Closed Taxonomy**: Internal/external/unhandled categories with
//!   compile-time-checked name sets
//! - **Ambient Provenance**: stage/component/source tagged automatically from
//!   scoped context, no parameter threading
//! - **Opaque-Error Classification**: deterministic mapping of platform and
//!   dynamic failures into the taxonomy, never silently dropped
//! - **Stable Serialization**: camelCase wire record for logging and
//!   telemetry transport
//! - **Task Isolation**: per-operation context scopes, no cross-task leakage
//!
//! ## Example
//!
//! ```rust
//! use errorkit::{classify_io, scope_component_sync, scope_operation_sync};
//!
//! let err = scope_operation_sync("create", || {
//!     scope_component_sync("generator", None, || {
//!         let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "template missing");
//!         classify_io(io_err)
//!     })
//! });
//!
//! assert_eq!(err.name(), "FileNotExists");
//! assert_eq!(err.stage(), "create");
//! assert_eq!(err.component(), "generator");
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub mod classify;
pub mod context;
pub mod error;
pub mod scope;
pub mod taxonomy;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use classify::{classify, classify_io, classify_value, INTERNAL_CODE_PREFIX};
pub use context::{current_error_context, reset_error_context, set_error_context, ErrorContext};
pub use error::{ErrorRecord, InnerCause, TypedError, TypedErrorBuilder, TypedResult};
pub use scope::{scope_component, scope_component_sync, scope_operation, scope_operation_sync};
pub use taxonomy::{Category, Entity, ExternalName, InternalName, UNHANDLED_NAME};
