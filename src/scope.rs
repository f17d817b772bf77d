//! Context-scoping middleware.
//!
//! Higher-order combinators that seed the ambient [`ErrorContext`] before an
//! operation runs, so typed errors constructed anywhere inside inherit
//! provenance without explicit parameters. The combinators never inspect the
//! operation's result and never swallow its failures; they are pure
//! provenance seeding.
//!
//! [`scope_operation`] opens a fresh task-local context for one logical
//! operation; concurrent operations on separate tasks cannot observe each
//! other's provenance. [`scope_component`] runs inside whatever scope is
//! active (task-local or the process fallback) and tags the subsystem and
//! provider, first-write-wins.
//!
//! # Example
//!
//! ```rust
//! use errorkit::{scope_component_sync, scope_operation_sync, InternalName, TypedError};
//!
//! let err = scope_operation_sync("create", || {
//!     scope_component_sync("generator", None, || {
//!         TypedError::internal(InternalName::Execution)
//!             .message("template expansion failed")
//!             .build()
//!     })
//! });
//!
//! assert_eq!(err.stage(), "create");
//! assert_eq!(err.component(), "generator");
//! ```

use std::cell::RefCell;
use std::future::Future;

use crate::context::{set_error_context, ErrorContext, SCOPED_CONTEXT};
use crate::logging::log_debug;

/// Run one logical operation inside a fresh task-local context seeded with
/// its stage name.
///
/// The scope starts empty apart from `stage`, so provenance from a previous
/// operation on the same task cannot leak in.
pub async fn scope_operation<F>(stage: &str, op: F) -> F::Output
where
    F: Future,
{
    log_debug!(stage = %stage, "entering operation scope");
    SCOPED_CONTEXT
        .scope(RefCell::new(ErrorContext::with_stage(stage)), op)
        .await
}

/// Synchronous form of [`scope_operation`] for hosts without a runtime.
pub fn scope_operation_sync<T>(stage: &str, op: impl FnOnce() -> T) -> T {
    log_debug!(stage = %stage, "entering operation scope");
    SCOPED_CONTEXT.sync_scope(RefCell::new(ErrorContext::with_stage(stage)), op)
}

/// Tag the active context with a component and optional provider, then run
/// the operation.
///
/// Seeding happens before the operation is invoked and uses first-write-wins
/// merging: a component set by an outer wrapper keeps ownership of the
/// field. The operation's output, success or failure, passes through
/// untouched.
pub async fn scope_component<F>(component: &str, source: Option<&str>, op: F) -> F::Output
where
    F: Future,
{
    set_error_context(ErrorContext::with_component(component, source));
    op.await
}

/// Synchronous form of [`scope_component`].
pub fn scope_component_sync<T>(
    component: &str,
    source: Option<&str>,
    op: impl FnOnce() -> T,
) -> T {
    set_error_context(ErrorContext::with_component(component, source));
    op()
}
