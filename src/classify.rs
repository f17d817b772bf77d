//! Deterministic classification of opaque failures into the taxonomy.
//!
//! This module is the single conversion boundary between "whatever a lower
//! layer failed with" and [`TypedError`]. Nothing downstream pattern-matches
//! on raw causes again. Classification never fails: anything unrecognized
//! becomes an unhandled-category error carrying the original cause.
//!
//! Three entry points cover the opaque shapes Rust callers actually hold:
//! [`classify`] for dynamic error chains, [`classify_io`] for platform I/O
//! errors, and [`classify_value`] for structured payloads (strings, JSON
//! objects with errno-style `code` fields).

use std::io;

use serde_json::Value;

use crate::error::{InnerCause, TypedError};
use crate::logging::{log_debug, log_warn};
use crate::taxonomy::InternalName;

/// Reserved prefix for crate-internal error codes carried by structured
/// payloads. Codes under this prefix are looked up in the same fixed table
/// as platform codes; a miss normalizes to unhandled rather than failing.
pub const INTERNAL_CODE_PREFIX: &str = "internal/";

/// Fixed code-to-name table. The only mapping from errno-style code strings
/// into the internal taxonomy; changing an entry changes the wire-visible
/// classification of platform failures.
fn name_for_code(code: &str) -> Option<InternalName> {
    let code = code.strip_prefix(INTERNAL_CODE_PREFIX).unwrap_or(code);
    match code {
        "permission-denied" => Some(InternalName::PermissionDenied),
        "not-found" => Some(InternalName::FileNotExists),
        "already-exists" => Some(InternalName::FileExists),
        "connection-refused" | "connection-reset" => Some(InternalName::Network),
        _ => None,
    }
}

/// Errno-style code string for a platform I/O error kind. Kinds outside
/// this set carry no code and classify as unhandled.
fn errno_code(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission-denied"),
        io::ErrorKind::NotFound => Some("not-found"),
        io::ErrorKind::AlreadyExists => Some("already-exists"),
        io::ErrorKind::ConnectionRefused => Some("connection-refused"),
        io::ErrorKind::ConnectionReset => Some("connection-reset"),
        _ => None,
    }
}

/// Classify a dynamic error chain.
///
/// Rules, in order:
/// 1. Already a [`TypedError`]: returned unchanged (idempotent).
/// 2. A platform [`io::Error`]: mapped through the fixed code table.
/// 3. Anything else: wrapped as unhandled with the rendered message
///    preserved as the inner cause.
///
/// # Example
///
/// ```rust
/// use errorkit::{classify, Category};
///
/// let err = classify(anyhow::anyhow!("boom"));
/// assert_eq!(err.category(), Category::Unhandled);
/// assert_eq!(err.message(), "boom");
/// ```
pub fn classify(err: anyhow::Error) -> TypedError {
    let err = match err.downcast::<TypedError>() {
        Ok(typed) => return typed,
        Err(err) => err,
    };
    let err = match err.downcast::<io::Error>() {
        Ok(io_err) => return classify_io(io_err),
        Err(err) => err,
    };
    log_warn!(error = %err, "normalizing unclassified error");
    TypedError::unhandled(InnerCause::native(err.to_string())).build()
}

/// Classify a platform I/O error through the fixed code table.
///
/// Recognized kinds become internal errors named by the table; the original
/// error text is preserved as the inner cause. Unrecognized kinds become
/// unhandled errors.
pub fn classify_io(err: io::Error) -> TypedError {
    let mapped = errno_code(err.kind()).and_then(name_for_code);
    let inner = InnerCause::native(err.to_string());
    match mapped {
        Some(name) => {
            log_debug!(name = name.as_str(), "classified platform error");
            TypedError::internal(name).inner(inner).build()
        }
        None => {
            log_warn!(kind = ?err.kind(), "normalizing unclassified platform error");
            TypedError::unhandled(inner).build()
        }
    }
}

/// Classify a structured payload.
///
/// A plain string wraps as unhandled with the string preserved as the inner
/// cause's message. An object carrying a recognized (or
/// [`INTERNAL_CODE_PREFIX`]-reserved) `code` string maps through the fixed
/// table to an internal error, with the whole object preserved as the inner
/// cause; the object's `message` field, when present, becomes the error
/// message. Everything else wraps as unhandled.
pub fn classify_value(value: Value) -> TypedError {
    if let Value::String(text) = value {
        log_warn!(message = %text, "normalizing bare string error");
        return TypedError::unhandled(InnerCause::native(text)).build();
    }
    let mapped = value
        .as_object()
        .and_then(|fields| fields.get("code"))
        .and_then(Value::as_str)
        .and_then(name_for_code);
    match mapped {
        Some(name) => {
            log_debug!(name = name.as_str(), "classified coded error payload");
            TypedError::internal(name)
                .inner(InnerCause::Structured(value))
                .build()
        }
        None => {
            log_warn!("normalizing unclassified error payload");
            TypedError::unhandled(InnerCause::Structured(value)).build()
        }
    }
}
