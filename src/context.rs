//! Ambient provenance context read by error construction.
//!
//! Each logical operation carries an [`ErrorContext`] naming the top-level
//! operation (`stage`), the subsystem currently executing (`component`), and
//! the external provider in play (`source`). Scope middleware seeds it once;
//! error construction snapshots it so call sites never thread provenance
//! explicitly.
//!
//! Storage is two-tier. When the current task runs inside a scope opened by
//! [`crate::scope::scope_operation`], the context is task-local and dies with
//! the scope, so concurrent operations cannot observe each other's
//! provenance. Outside any scope (a short-lived CLI invocation, a sync
//! caller) updates land in a process-wide fallback store, which callers must
//! clear with [`reset_error_context`] at the start of each logical operation.
//!
//! All writes are first-write-wins: the first component to tag a field owns
//! it, and later writes never overwrite a non-empty value. Only
//! [`reset_error_context`] clears fields.

use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// Provenance snapshot attached to typed errors at construction time.
///
/// An empty `stage`/`component` or `None` source means "unknown"; the same
/// value doubles as a partial update where empty fields are "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorContext {
    /// Top-level operation currently executing, `""` if unknown.
    pub stage: String,
    /// Internal subsystem currently executing, `""` if unknown.
    pub component: String,
    /// External provider in play, only meaningful for external errors.
    pub source: Option<String>,
}

impl ErrorContext {
    /// An empty context: every field unknown.
    pub const fn new() -> Self {
        Self {
            stage: String::new(),
            component: String::new(),
            source: None,
        }
    }

    /// A partial update naming only the stage.
    pub fn with_stage(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            ..Self::new()
        }
    }

    /// A partial update naming a component and optionally its provider.
    pub fn with_component(component: impl Into<String>, source: Option<&str>) -> Self {
        Self {
            component: component.into(),
            source: source.map(str::to_string),
            ..Self::new()
        }
    }

    /// First-write-wins merge: a field from `update` only lands if this
    /// context does not already carry a value for it.
    fn merge_first_write(&mut self, update: &ErrorContext) {
        if self.stage.is_empty() && !update.stage.is_empty() {
            self.stage = update.stage.clone();
        }
        if self.component.is_empty() && !update.component.is_empty() {
            self.component = update.component.clone();
        }
        if self.source.is_none() && update.source.is_some() {
            self.source = update.source.clone();
        }
    }

    fn clear(&mut self) {
        *self = Self::new();
    }
}

tokio::task_local! {
    /// Per-operation context, entered by the scope middleware.
    pub(crate) static SCOPED_CONTEXT: RefCell<ErrorContext>;
}

/// Fallback store for callers running outside any operation scope.
static PROCESS_CONTEXT: Mutex<ErrorContext> = Mutex::new(ErrorContext::new());

fn lock_process_context() -> MutexGuard<'static, ErrorContext> {
    PROCESS_CONTEXT.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Merge a partial update into the active context, first-write-wins.
///
/// Empty/`None` fields in `update` are ignored. Fields already set in the
/// active context are never overwritten; use [`reset_error_context`] to
/// start over for a new logical operation.
pub fn set_error_context(update: ErrorContext) {
    let scoped = SCOPED_CONTEXT.try_with(|ctx| ctx.borrow_mut().merge_first_write(&update));
    if scoped.is_err() {
        lock_process_context().merge_first_write(&update);
    }
}

/// Read-only snapshot of the active context.
pub fn current_error_context() -> ErrorContext {
    SCOPED_CONTEXT
        .try_with(|ctx| ctx.borrow().clone())
        .unwrap_or_else(|_| lock_process_context().clone())
}

/// Clear every field of the active context.
///
/// Required at the start of each logical operation when running on the
/// process-wide fallback store, so stale provenance from the previous
/// operation cannot leak into the next one's errors. Task-local scopes get
/// this for free: each scope starts fresh.
pub fn reset_error_context() {
    let scoped = SCOPED_CONTEXT.try_with(|ctx| ctx.borrow_mut().clear());
    if scoped.is_err() {
        lock_process_context().clear();
    }
}
