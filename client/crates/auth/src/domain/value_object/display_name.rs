//! Display Name Value Object
//!
//! Full name entered at sign-up. Only requirement: something other than
//! whitespace.

use std::fmt;

use crate::error::{AuthError, ValidationField};

/// User-facing message for a missing name
pub const NAME_REQUIRED_MESSAGE: &str = "Please enter your full name.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Trim and require a non-empty result
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AuthError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AuthError::ValidationFailed(
                ValidationField::Name,
                NAME_REQUIRED_MESSAGE.to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
