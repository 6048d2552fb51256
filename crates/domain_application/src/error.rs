//! Application domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the application domain
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// A status string did not name a known status
    #[error("Unknown application status: {0}")]
    UnknownStatus(String),

    /// The underlying store failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApplicationError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApplicationError::Validation(_) | ApplicationError::UnknownStatus(_))
    }
}
