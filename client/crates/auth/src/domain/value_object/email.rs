//! Email Value Object
//!
//! Represents a syntactically plausible email address.
//! Permissive on purpose: the identity service decides whether the
//! account exists, this only catches obvious typos before a network call.

use std::str::FromStr;

use crate::error::{AuthError, ValidationField};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// User-facing message for a malformed address
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl AsRef<str>) -> Result<Self, AuthError> {
        let email = email.as_ref().trim();

        if email.is_empty()
            || email.chars().count() > EMAIL_MAX_LENGTH
            || !Self::is_valid_format(email)
        {
            return Err(AuthError::ValidationFailed(
                ValidationField::Email,
                INVALID_EMAIL_MESSAGE.to_string(),
            ));
        }

        Ok(Self(email.to_string()))
    }

    /// Exactly one `@`, both sides non-empty, no whitespace
    fn is_valid_format(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        }
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form used as a lookup key
    pub fn canonical(&self) -> String {
        self.0.to_lowercase()
    }

    /// Get the local part of the email
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, AuthError> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
