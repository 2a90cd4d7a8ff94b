//! Cross-cutting error types for the admissions review crates.
//!
//! These are the domain failures every layer agrees on. Store failures
//! (`DatabaseError`) and transport failures (`ApiError`, `ClientError`) live in
//! their own crates and wrap this type.

use thiserror::Error;

/// Domain errors raised by validation and the status workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Identifier is empty, a placeholder token, or structurally malformed.
    #[error("Invalid id: {0:?}")]
    InvalidIdentifier(String),

    /// A required request field was absent or empty.
    #[error("Missing {field}")]
    MissingField { field: String },

    /// A status value outside the enumeration was supplied.
    #[error("Unknown status: {0:?}")]
    UnknownStatus(String),

    /// The configured transition policy rejected the change.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Entity lookup returned no result.
    #[error("Not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },
}

impl CoreError {
    /// Shorthand for a missing request field.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    /// Shorthand for a missing application row.
    #[must_use]
    pub fn application_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "application".to_string(),
            id: id.to_string(),
        }
    }
}
