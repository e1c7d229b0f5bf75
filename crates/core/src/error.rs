//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, recoverable failures: everything here
/// is presentable at the UI boundary without tearing down prior state.
/// Infrastructure concerns degrade (see `Storage`) rather than escalate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Authentication failed (empty or rejected credentials).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A required input field was empty or absent.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A field failed validation.
    #[error("validation failed for '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// A record with the given id does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A status change not permitted by the record's transition table.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// A view name outside the closed `ActiveView` set.
    #[error("unknown view: {0}")]
    UnknownView(String),

    /// No authenticated session for a session-gated operation.
    #[error("not signed in")]
    Unauthorized,

    /// Client-local storage was unreadable or unwritable.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(id: impl core::fmt::Display) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn invalid_transition(
        from: impl core::fmt::Display,
        to: impl core::fmt::Display,
    ) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_names_both_states() {
        let err = DomainError::invalid_transition("completed", "assigned");
        assert_eq!(
            err.to_string(),
            "invalid status transition: completed -> assigned"
        );
    }

    #[test]
    fn validation_error_names_field() {
        let err = DomainError::validation("pickup.address", "must not be empty");
        assert!(err.to_string().contains("pickup.address"));
    }
}
