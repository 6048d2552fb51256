//! Quote domain errors
//!
//! The engine performs no I/O, so every error here is permanent: either the
//! caller sent a request that violates a precondition, or an institution
//! profile failed its invariants when it was built.

use thiserror::Error;

/// Errors that can occur in the quote domain
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuoteError {
    /// A request field violates its precondition
    #[error("Invalid request: {field} {reason}")]
    InvalidRequest {
        field: String,
        reason: String,
    },

    /// A profile failed validation at construction time
    #[error("Invalid profile: {field} {reason}")]
    InvalidProfile {
        field: String,
        reason: String,
    },

    /// No provider is registered under the requested code
    #[error("Unknown institution: {0}")]
    UnknownInstitution(String),

    /// A provider is already registered under this code
    #[error("Institution already registered: {0}")]
    DuplicateInstitution(String),
}

impl QuoteError {
    pub fn invalid_request(field: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidRequest {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_profile(field: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidProfile {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending field for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            QuoteError::InvalidRequest { field, .. } | QuoteError::InvalidProfile { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}
