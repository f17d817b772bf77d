// Unit Tests for the Opaque-Error Classifier
//
// UNIT UNDER TEST: classify, classify_io, classify_value
//
// BUSINESS RESPONSIBILITY:
//   - Single conversion boundary from raw failures into the typed taxonomy
//   - Idempotent on already-typed errors
//   - Maps recognized platform codes deterministically through the fixed
//     code table
//   - Preserves the original cause unmodified for forensic inspection
//   - Never fails: anything unrecognized becomes an unhandled error
//
// TEST COVERAGE:
//   - Idempotence via downcast recovery
//   - Bare string wrapping with the string preserved as the cause message
//   - The complete fixed code table, both as io::ErrorKind and as coded
//     JSON payloads
//   - Reserved internal-prefix codes
//   - Unknown codes and arbitrary payloads normalizing without panicking

use std::io;

use serde_json::json;

use crate::classify::{classify, classify_io, classify_value};
use crate::error::{InnerCause, TypedError};
use crate::scope::scope_operation_sync;
use crate::taxonomy::{Category, InternalName};

#[cfg(test)]
mod idempotence_tests {
    use super::*;

    #[test]
    fn test_already_typed_errors_are_returned_unchanged() {
        // Arrange
        let typed = scope_operation_sync("create", || {
            TypedError::internal(InternalName::UserCancel)
                .message("User cancelled")
                .component("ui")
                .build()
        });

        // Act - round-trip through a dynamic error chain
        let reclassified = classify(anyhow::Error::new(typed.clone()));

        // Assert
        assert_eq!(reclassified, typed);
    }

    #[test]
    fn test_classify_is_idempotent_for_opaque_input() {
        // Arrange
        let first = scope_operation_sync("", || classify(anyhow::anyhow!("boom")));

        // Act
        let second = scope_operation_sync("", || classify(anyhow::Error::new(first.clone())));

        // Assert
        assert_eq!(second, first);
    }
}

#[cfg(test)]
mod string_wrapping_tests {
    use super::*;

    #[test]
    fn test_bare_string_becomes_unhandled_with_the_string_as_cause_message() {
        // Act
        let err = scope_operation_sync("", || classify_value(json!("boom")));

        // Assert
        assert_eq!(err.category(), Category::Unhandled);
        assert_eq!(err.name(), "Unhandled");
        assert_eq!(
            err.inner().and_then(InnerCause::message),
            Some("boom"),
            "original string must survive as the cause message"
        );
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn test_message_only_dynamic_error_becomes_unhandled() {
        // Act
        let err = scope_operation_sync("", || classify(anyhow::anyhow!("boom")));

        // Assert
        assert_eq!(err.category(), Category::Unhandled);
        assert_eq!(err.message(), "boom");
    }
}

#[cfg(test)]
mod code_table_tests {
    use super::*;

    #[test]
    fn test_fixed_code_table_for_io_error_kinds() {
        // Test verifies the complete kind-to-name mapping; an entry drifting
        // changes the wire-visible classification of platform failures

        let expected = [
            (io::ErrorKind::PermissionDenied, InternalName::PermissionDenied),
            (io::ErrorKind::NotFound, InternalName::FileNotExists),
            (io::ErrorKind::AlreadyExists, InternalName::FileExists),
            (io::ErrorKind::ConnectionRefused, InternalName::Network),
            (io::ErrorKind::ConnectionReset, InternalName::Network),
        ];

        for (kind, name) in expected {
            // Act
            let err = scope_operation_sync("", || {
                classify_io(io::Error::new(kind, "platform failure"))
            });

            // Assert
            assert_eq!(
                err.category(),
                Category::Internal(name),
                "mapping drifted for {kind:?}"
            );
        }
    }

    #[test]
    fn test_io_error_text_is_preserved_as_the_cause() {
        // Arrange
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access to ./env denied");
        let rendered = io_err.to_string();

        // Act
        let err = scope_operation_sync("", || classify_io(io_err));

        // Assert
        assert_eq!(err.inner().and_then(InnerCause::message), Some(rendered.as_str()));
        assert_eq!(err.message(), rendered);
    }

    #[test]
    fn test_unmapped_io_error_kind_normalizes_to_unhandled() {
        // Act
        let err = scope_operation_sync("", || {
            classify_io(io::Error::new(io::ErrorKind::Interrupted, "interrupted"))
        });

        // Assert
        assert_eq!(err.category(), Category::Unhandled);
    }

    #[test]
    fn test_io_errors_inside_dynamic_chains_use_the_same_table() {
        // Act
        let err = scope_operation_sync("", || {
            classify(anyhow::Error::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connect ECONNREFUSED 127.0.0.1:443",
            )))
        });

        // Assert
        assert_eq!(err.category(), Category::Internal(InternalName::Network));
    }
}

#[cfg(test)]
mod coded_payload_tests {
    use super::*;

    #[test]
    fn test_permission_denied_code_maps_through_the_table() {
        // Arrange
        let payload = json!({"code": "permission-denied", "message": "EACCES: operation not permitted"});

        // Act
        let err = scope_operation_sync("", || classify_value(payload.clone()));

        // Assert
        assert_eq!(err.category(), Category::Internal(InternalName::PermissionDenied));
        assert_eq!(
            err.inner(),
            Some(&InnerCause::Structured(payload)),
            "original payload must be preserved unmodified"
        );
        assert_eq!(err.message(), "EACCES: operation not permitted");
    }

    #[test]
    fn test_every_table_entry_maps_from_a_coded_payload() {
        let expected = [
            ("permission-denied", InternalName::PermissionDenied),
            ("not-found", InternalName::FileNotExists),
            ("already-exists", InternalName::FileExists),
            ("connection-refused", InternalName::Network),
            ("connection-reset", InternalName::Network),
        ];

        for (code, name) in expected {
            // Act
            let err = scope_operation_sync("", || classify_value(json!({"code": code})));

            // Assert
            assert_eq!(
                err.category(),
                Category::Internal(name),
                "mapping drifted for code {code:?}"
            );
        }
    }

    #[test]
    fn test_reserved_prefix_codes_use_the_same_table() {
        // Act
        let err = scope_operation_sync("", || {
            classify_value(json!({"code": "internal/not-found", "message": "env file missing"}))
        });

        // Assert
        assert_eq!(err.category(), Category::Internal(InternalName::FileNotExists));
    }

    #[test]
    fn test_unknown_code_normalizes_to_unhandled_without_panicking() {
        // Act
        let err = scope_operation_sync("", || classify_value(json!({"code": "totally-unknown"})));

        // Assert
        assert_eq!(err.category(), Category::Unhandled);
    }

    #[test]
    fn test_reserved_prefix_with_no_table_entry_falls_through_to_unhandled() {
        // Act
        let err = scope_operation_sync("", || {
            classify_value(json!({"code": "internal/quota-exhausted"}))
        });

        // Assert
        assert_eq!(err.category(), Category::Unhandled);
    }

    #[test]
    fn test_arbitrary_payload_is_preserved_inside_unhandled() {
        // Arrange
        let payload = json!({"status": 500, "body": {"retriable": false}});

        // Act
        let err = scope_operation_sync("", || classify_value(payload.clone()));

        // Assert
        assert_eq!(err.category(), Category::Unhandled);
        assert_eq!(err.inner(), Some(&InnerCause::Structured(payload)));
        assert_eq!(err.message(), "", "no message field means an empty message");
    }
}

#[cfg(test)]
mod ambient_tagging_tests {
    use super::*;

    #[test]
    fn test_classified_errors_inherit_scope_provenance() {
        // Test verifies classification constructs through the normal factory
        // path, so ambient provenance lands on normalized errors too

        // Act
        let err = scope_operation_sync("provision", || {
            classify_io(io::Error::new(io::ErrorKind::NotFound, "missing bicep file"))
        });

        // Assert
        assert_eq!(err.stage(), "provision");
    }
}
