//! Auth Error Types
//!
//! This module provides the auth error taxonomy and its mapping onto the
//! unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::gateway::GatewayError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Input a local validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationField {
    Name,
    Email,
    Password,
    /// The operation is not allowed in the current session state
    Session,
}

/// Auth-specific error variants
///
/// `Clone` so the last failure can be kept on the session as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Local precondition violation, detected before any gateway call
    #[error("Validation failed: {1}")]
    ValidationFailed(ValidationField, String),

    /// The identity service rejected the credentials or the federated flow
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The identity service could not be reached
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// Session invariant violated; indicates a defect
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl AuthError {
    /// The reason without the variant prefix
    pub fn reason(&self) -> &str {
        match self {
            AuthError::ValidationFailed(_, reason)
            | AuthError::AuthenticationFailed(reason)
            | AuthError::NetworkUnavailable(reason)
            | AuthError::InvalidStateTransition(reason) => reason,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::ValidationFailed(..) => ErrorKind::Validation,
            AuthError::AuthenticationFailed(_) => ErrorKind::Unauthorized,
            AuthError::NetworkUnavailable(_) => ErrorKind::Unavailable,
            AuthError::InvalidStateTransition(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.reason().to_string());
        match self {
            AuthError::ValidationFailed(..) => err.with_action("Correct the highlighted field"),
            AuthError::AuthenticationFailed(_) => {
                err.with_action("Check your credentials and try again")
            }
            AuthError::NetworkUnavailable(_) => {
                err.with_action("Check your connection and try again")
            }
            AuthError::InvalidStateTransition(_) => err,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::InvalidStateTransition(reason) => {
                tracing::error!(reason = %reason, "Session invariant violated");
            }
            AuthError::NetworkUnavailable(reason) => {
                tracing::warn!(reason = %reason, "Identity service unreachable");
            }
            AuthError::AuthenticationFailed(reason) => {
                tracing::warn!(reason = %reason, "Identity service rejected request");
            }
            AuthError::ValidationFailed(field, _) => {
                tracing::debug!(field = ?field, error = %self, "Local validation failed");
            }
        }
    }
}

impl From<GatewayError> for AuthError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected(reason) => AuthError::AuthenticationFailed(reason),
            GatewayError::Unreachable(reason) => AuthError::NetworkUnavailable(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let test_cases: Vec<(AuthError, ErrorKind)> = vec![
            (
                AuthError::ValidationFailed(ValidationField::Email, "x".into()),
                ErrorKind::Validation,
            ),
            (
                AuthError::AuthenticationFailed("x".into()),
                ErrorKind::Unauthorized,
            ),
            (
                AuthError::NetworkUnavailable("x".into()),
                ErrorKind::Unavailable,
            ),
            (
                AuthError::InvalidStateTransition("x".into()),
                ErrorKind::Internal,
            ),
        ];

        for (error, expected) in test_cases {
            assert_eq!(error.kind(), expected, "{error} maps to wrong kind");
        }
    }

    #[test]
    fn test_only_defects_are_unrecoverable() {
        let recoverable = [
            AuthError::ValidationFailed(ValidationField::Name, "x".into()),
            AuthError::AuthenticationFailed("x".into()),
            AuthError::NetworkUnavailable("x".into()),
        ];
        for err in recoverable {
            assert!(err.to_app_error().is_recoverable(), "{err}");
        }
        assert!(
            !AuthError::InvalidStateTransition("x".into())
                .to_app_error()
                .is_recoverable()
        );
    }

    #[test]
    fn test_from_gateway_error() {
        assert_eq!(
            AuthError::from(GatewayError::Rejected("invalid email or password".into())),
            AuthError::AuthenticationFailed("invalid email or password".into())
        );
        assert_eq!(
            AuthError::from(GatewayError::Unreachable("timed out".into())),
            AuthError::NetworkUnavailable("timed out".into())
        );
    }

    #[test]
    fn test_to_app_error() {
        let app_err = AuthError::NetworkUnavailable("timed out".into()).to_app_error();
        assert_eq!(app_err.kind(), ErrorKind::Unavailable);
        assert_eq!(app_err.message(), "timed out");
        assert!(app_err.action().is_some());
    }

    #[test]
    fn test_reason_strips_prefix() {
        let err = AuthError::ValidationFailed(
            ValidationField::Name,
            "Please enter your full name.".into(),
        );
        assert_eq!(err.reason(), "Please enter your full name.");
        assert!(err.to_string().starts_with("Validation failed"));
    }
}
