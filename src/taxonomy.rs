//! Error taxonomy: category discriminant, per-category name sets, and
//! responsibility attribution.
//!
//! The category and its name are co-constrained at the type level: an
//! internal error can only carry an [`InternalName`], an external error an
//! [`ExternalName`], and an unhandled error always reports the single
//! sentinel name. Matching on [`Category`] is exhaustive, so downstream
//! routing code cannot forget a category.

use serde::{Deserialize, Serialize};

/// Wire name reported by every unhandled-category error.
pub const UNHANDLED_NAME: &str = "Unhandled";

/// Names allowed for internal-category errors.
///
/// Internal errors are local or environmental failures: the machine, the
/// workspace, or the user's own input, not a third-party service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternalName {
    FileNotExists,
    FileExists,
    PermissionDenied,
    Execution,
    UserCancel,
    MissingEnvVars,
    Environment,
    Timeout,
    IllegalInput,
    InvalidFormat,
    ValidationFailure,
    Network,
    /// No specific name; serializes to the empty string.
    #[serde(rename = "")]
    Unspecified,
}

impl InternalName {
    /// Stable wire string for this name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileNotExists => "FileNotExists",
            Self::FileExists => "FileExists",
            Self::PermissionDenied => "PermissionDenied",
            Self::Execution => "Execution",
            Self::UserCancel => "UserCancel",
            Self::MissingEnvVars => "MissingEnvVars",
            Self::Environment => "Environment",
            Self::Timeout => "Timeout",
            Self::IllegalInput => "IllegalInput",
            Self::InvalidFormat => "InvalidFormat",
            Self::ValidationFailure => "ValidationFailure",
            Self::Network => "Network",
            Self::Unspecified => "",
        }
    }
}

/// Names allowed for external-category errors.
///
/// External errors are failures attributable to a third-party or remote
/// service. They always carry the remote cause as an inner error and may be
/// tagged with a `source` naming the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalName {
    Network,
    Authentication,
    ResourceNotFound,
    ResourceConflict,
    PermissionDenied,
    /// No specific name; serializes to the empty string.
    #[serde(rename = "")]
    Unspecified,
}

impl ExternalName {
    /// Stable wire string for this name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "Network",
            Self::Authentication => "Authentication",
            Self::ResourceNotFound => "ResourceNotFound",
            Self::ResourceConflict => "ResourceConflict",
            Self::PermissionDenied => "PermissionDenied",
            Self::Unspecified => "",
        }
    }
}

/// Top-level taxonomy discriminant.
///
/// Every failure in the system is exactly one of these. The carried name is
/// the conventional error discriminator used by logs and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Local or environmental failure (missing file, permission, timeout,
    /// user cancellation, invalid input).
    Internal(InternalName),
    /// Failure attributable to a third-party or remote service.
    External(ExternalName),
    /// Anything not classified. A catch-all that is tagged and reported,
    /// never silently dropped.
    Unhandled,
}

impl Category {
    /// Stable wire string for the category itself: `"internal"`,
    /// `"external"`, or `"unhandled"`.
    pub fn kind(self) -> &'static str {
        match self {
            Self::Internal(_) => "internal",
            Self::External(_) => "external",
            Self::Unhandled => "unhandled",
        }
    }

    /// Stable wire string for the carried name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Internal(name) => name.as_str(),
            Self::External(name) => name.as_str(),
            Self::Unhandled => UNHANDLED_NAME,
        }
    }

    pub fn is_internal(self) -> bool {
        matches!(self, Self::Internal(_))
    }

    pub fn is_external(self) -> bool {
        matches!(self, Self::External(_))
    }

    pub fn is_unhandled(self) -> bool {
        matches!(self, Self::Unhandled)
    }
}

/// Who is responsible for a failure.
///
/// Drives presentation decisions: user errors get remediation guidance,
/// system errors get diagnostics and bug reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    User,
    #[default]
    System,
}

impl Entity {
    /// Stable wire string: `"user"` or `"system"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }
}
