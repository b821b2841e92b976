//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The operation did not complete within its time budget
    #[error("Operation timed out")]
    Timeout,

    /// The reading store is not configured or unreachable
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::ExternalService(_)
                | ApplicationError::Timeout
                | ApplicationError::StoreUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_retryable() {
        assert!(ApplicationError::ExternalService("503".into()).is_retryable());
        assert!(ApplicationError::Timeout.is_retryable());
        assert!(ApplicationError::StoreUnavailable("no pool".into()).is_retryable());
    }

    #[test]
    fn permanent_errors_are_not_retryable() {
        assert!(!ApplicationError::Configuration("bad port".into()).is_retryable());
        assert!(!ApplicationError::Internal("oops".into()).is_retryable());
        assert!(!ApplicationError::Domain(DomainError::InvalidCoordinates).is_retryable());
    }

    #[test]
    fn display_messages() {
        let err = ApplicationError::ExternalService("connection refused".into());
        assert_eq!(err.to_string(), "External service error: connection refused");
        assert_eq!(ApplicationError::Timeout.to_string(), "Operation timed out");
    }
}
