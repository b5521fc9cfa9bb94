//! Notices
//!
//! Transient user notifications derived from operation failures.

use serde::Serialize;

use crate::domain::value_object::auth_operation::AuthOperation;
use crate::error::{AuthError, ValidationField};

const FALLBACK_DESCRIPTION: &str = "Something went wrong";

/// Transient notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub description: String,
    pub destructive: bool,
}

impl Notice {
    /// Notice for a failed operation
    pub fn from_error(operation: AuthOperation, err: &AuthError) -> Self {
        let reason = err.reason();
        let title = match err {
            AuthError::ValidationFailed(ValidationField::Name, _) => "Name Required",
            AuthError::ValidationFailed(ValidationField::Email, _) => "Invalid Email",
            AuthError::ValidationFailed(ValidationField::Password, _) => "Invalid Password",
            AuthError::NetworkUnavailable(_) => "Network Unavailable",
            _ if operation == AuthOperation::FederatedLogin => "Google Sign-In Error",
            _ => "Authentication Error",
        };

        let description = if reason.trim().is_empty() {
            FALLBACK_DESCRIPTION.to_string()
        } else {
            reason.to_string()
        };

        Self {
            title,
            description,
            destructive: true,
        }
    }

    /// Informational notice
    pub fn info(title: &'static str, description: impl Into<String>) -> Self {
        Self {
            title,
            description: description.into(),
            destructive: false,
        }
    }
}
