//! The typed error entity and its construction.
//!
//! Every failure surfaced by this crate is a [`TypedError`]: a category from
//! the closed taxonomy, a responsibility entity, provenance fields
//! (stage/component/source), an optional preserved inner cause, and a pair of
//! messages: `message` for diagnostics, `display_message` for end users.
//!
//! Construction goes through [`TypedErrorBuilder`], the options object of the
//! factory. `build()` is where ambient context is late-bound: any provenance
//! field the call site did not set explicitly is filled from the current
//! [`ErrorContext`](crate::ErrorContext) snapshot. After `build()` the error
//! is immutable.
//!
//! # Example
//!
//! ```rust
//! use errorkit::{InternalName, TypedError};
//!
//! let err = TypedError::internal(InternalName::IllegalInput)
//!     .message("app name may not be empty")
//!     .component("validator")
//!     .build();
//!
//! assert_eq!(err.name(), "IllegalInput");
//! assert_eq!(err.display_message(), "app name may not be empty");
//! ```

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::context::current_error_context;
use crate::taxonomy::{Category, Entity, ExternalName, InternalName};

/// Convenient result type for operations that fail with a [`TypedError`].
///
/// Callers pattern-match on success/failure rather than unwinding; layers
/// that prefer dynamic propagation can wrap through `anyhow::Error` and
/// recover the typed value at the classifier.
pub type TypedResult<T> = std::result::Result<T, TypedError>;

/// The original cause of a failure, preserved unmodified for forensic
/// inspection.
///
/// Opaque causes are normalized into one of these two shapes exactly once,
/// at the classification boundary; nothing downstream re-inspects raw
/// thrown values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InnerCause {
    /// A native error: conventional name, message, and foreign stack text
    /// when one survived the boundary.
    Native {
        name: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },
    /// An arbitrary structured payload.
    Structured(Value),
}

impl InnerCause {
    /// A native cause carrying only a message, under the conventional
    /// `"Error"` name.
    pub fn native(message: impl Into<String>) -> Self {
        Self::Native {
            name: "Error".to_string(),
            message: message.into(),
            stack: None,
        }
    }

    /// The cause's message, when the cause is error-shaped.
    ///
    /// Structured payloads count as error-shaped when they are objects
    /// carrying a string `"message"` field.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Native { message, .. } => Some(message),
            Self::Structured(Value::Object(fields)) => {
                fields.get("message").and_then(Value::as_str)
            }
            Self::Structured(_) => None,
        }
    }
}

/// A fully tagged failure: taxonomy category, responsibility, provenance,
/// preserved cause, and messages.
///
/// Immutable once constructed. Implements `std::error::Error`, so it can
/// travel through `anyhow`/`Box<dyn Error>` pipelines and be recovered by
/// downcast in [`classify`](fn@crate::classify); implements [`Serialize`] with
/// the stable wire field names of [`ErrorRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypedError {
    category: Category,
    entity: Entity,
    stage: String,
    component: String,
    source: Option<String>,
    reason: Option<String>,
    inner: Option<InnerCause>,
    help_link: Option<String>,
    message: String,
    display_message: String,
    context: Option<Value>,
}

impl TypedError {
    /// Start building an internal-category error.
    pub fn internal(name: InternalName) -> TypedErrorBuilder {
        TypedErrorBuilder::new(Category::Internal(name))
    }

    /// Start building an external-category error.
    ///
    /// The remote cause is mandatory: an external failure without a cause is
    /// a contradiction, so the signature refuses to express one.
    pub fn external(name: ExternalName, inner: InnerCause) -> TypedErrorBuilder {
        let mut builder = TypedErrorBuilder::new(Category::External(name));
        builder.inner = Some(inner);
        builder
    }

    /// Start building an unhandled-category error wrapping an unrecognized
    /// cause.
    pub fn unhandled(inner: InnerCause) -> TypedErrorBuilder {
        let mut builder = TypedErrorBuilder::new(Category::Unhandled);
        builder.inner = Some(inner);
        builder
    }

    /// The user aborted the operation. Tagged as a user-responsibility
    /// internal error.
    pub fn user_cancel() -> Self {
        Self::internal(InternalName::UserCancel)
            .entity(Entity::User)
            .message("User cancelled")
            .build()
    }

    /// A required file is missing.
    pub fn file_not_exists(path: impl AsRef<str>) -> Self {
        Self::internal(InternalName::FileNotExists)
            .message(format!("File not found: {}", path.as_ref()))
            .build()
    }

    /// Required environment variables are unset.
    pub fn missing_env_vars(names: &[&str]) -> Self {
        Self::internal(InternalName::MissingEnvVars)
            .message(format!("Missing environment variables: {}", names.join(", ")))
            .build()
    }

    /// A local operation exceeded its deadline.
    pub fn timeout(seconds: u64) -> Self {
        Self::internal(InternalName::Timeout)
            .message(format!("Operation timed out after {seconds}s"))
            .build()
    }

    /// Taxonomy category of this error.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Conventional error discriminator: the category's wire name.
    pub fn name(&self) -> &'static str {
        self.category.name()
    }

    /// Who is responsible for this failure.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Top-level operation that was executing, `""` if unknown.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Internal subsystem that raised the error, `""` if unknown.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// External provider involved, only meaningful for external errors.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Free-text diagnostic detail.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// The preserved original cause.
    pub fn inner(&self) -> Option<&InnerCause> {
        self.inner.as_ref()
    }

    /// Link to remediation documentation.
    pub fn help_link(&self) -> Option<&str> {
        self.help_link.as_deref()
    }

    /// Diagnostic message. May contain sensitive detail; not for display.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The only field intended for surfacing to an end user.
    pub fn display_message(&self) -> &str {
        &self.display_message
    }

    /// Arbitrary structured diagnostic payload.
    pub fn context(&self) -> Option<&Value> {
        self.context.as_ref()
    }

    /// Whether the failure is attributed to the user rather than the system.
    pub fn is_user_error(&self) -> bool {
        self.entity == Entity::User
    }

    /// Whether retrying the operation may succeed without changing inputs.
    ///
    /// Network trouble and local timeouts are transient; everything else in
    /// the taxonomy needs a different input or environment first.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category,
            Category::Internal(InternalName::Timeout | InternalName::Network)
                | Category::External(ExternalName::Network)
        )
    }

    /// The stable wire shape of this error, borrowing its fields.
    ///
    /// Serializing the record (or the error itself, which delegates here)
    /// twice yields identical output: no timestamps, no randomness.
    pub fn record(&self) -> ErrorRecord<'_> {
        ErrorRecord {
            category: self.category.kind(),
            name: self.category.name(),
            entity: self.entity,
            stage: &self.stage,
            component: &self.component,
            source: self.source.as_deref(),
            reason: self.reason.as_deref(),
            inner_error: self.inner.as_ref(),
            help_link: self.help_link.as_deref(),
            message: &self.message,
            display_message: &self.display_message,
            context: self.context.as_ref(),
        }
    }
}

impl std::fmt::Display for TypedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TypedError {}

impl Serialize for TypedError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.record().serialize(serializer)
    }
}

/// Stable serialization shape for logging/telemetry transport.
///
/// Field names are a wire contract shared with log consumers; renaming any
/// of them is a breaking change requiring a version bump. Unset optional
/// fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord<'a> {
    pub category: &'static str,
    pub name: &'static str,
    pub entity: Entity,
    pub stage: &'a str,
    pub component: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_error: Option<&'a InnerCause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_link: Option<&'a str>,
    pub message: &'a str,
    pub display_message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a Value>,
}

/// Factory for [`TypedError`] values.
///
/// Recognized options mirror the error's fields. `build()` merges explicit
/// options with the ambient context snapshot (explicit always wins), derives
/// `message` from the inner cause when absent, and defaults
/// `display_message` to `message`.
#[derive(Debug)]
pub struct TypedErrorBuilder {
    category: Category,
    entity: Option<Entity>,
    stage: Option<String>,
    component: Option<String>,
    source: Option<String>,
    reason: Option<String>,
    inner: Option<InnerCause>,
    help_link: Option<String>,
    message: Option<String>,
    display_message: Option<String>,
    context: Option<Value>,
}

impl TypedErrorBuilder {
    fn new(category: Category) -> Self {
        Self {
            category,
            entity: None,
            stage: None,
            component: None,
            source: None,
            reason: None,
            inner: None,
            help_link: None,
            message: None,
            display_message: None,
            context: None,
        }
    }

    /// Responsibility attribution; defaults to [`Entity::System`].
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Top-level operation; inherited from ambient context when unset.
    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// Raising subsystem; inherited from ambient context when unset.
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// External provider; inherited from ambient context when unset.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Free-text diagnostic detail.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Preserve the original cause.
    pub fn inner(mut self, inner: InnerCause) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Link to remediation documentation.
    pub fn help_link(mut self, help_link: impl Into<String>) -> Self {
        self.help_link = Some(help_link.into());
        self
    }

    /// Diagnostic message; derived from the inner cause when unset.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// User-facing message; defaults to the diagnostic message.
    pub fn display_message(mut self, display_message: impl Into<String>) -> Self {
        self.display_message = Some(display_message.into());
        self
    }

    /// Arbitrary structured diagnostic payload.
    pub fn context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Finalize the error.
    ///
    /// Reads the ambient [`ErrorContext`](crate::ErrorContext) snapshot for
    /// provenance fields not set explicitly; mutates no shared state. Always
    /// produces a usable message string, possibly empty.
    pub fn build(self) -> TypedError {
        let ambient = current_error_context();
        let message = match self.message {
            Some(message) if !message.is_empty() => message,
            _ => self
                .inner
                .as_ref()
                .and_then(InnerCause::message)
                .unwrap_or_default()
                .to_string(),
        };
        let display_message = self.display_message.unwrap_or_else(|| message.clone());
        TypedError {
            category: self.category,
            entity: self.entity.unwrap_or_default(),
            stage: self.stage.unwrap_or(ambient.stage),
            component: self.component.unwrap_or(ambient.component),
            source: self.source.or(ambient.source),
            reason: self.reason,
            inner: self.inner,
            help_link: self.help_link,
            message,
            display_message,
            context: self.context,
        }
    }
}
