//! Profile Entity
//!
//! The current-user snapshot returned by the identity service.

use serde::{Deserialize, Serialize};

/// Signed-in user as seen by the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Build from identity service fields
    ///
    /// A missing or blank display name falls back to the local part of
    /// the email.
    pub fn from_parts(display_name: Option<String>, email: impl Into<String>) -> Self {
        let email = email.into();
        let name = display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        Self { name, email }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_keeps_display_name() {
        let profile = Profile::from_parts(Some("Ada Lovelace".into()), "ada@example.com");
        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.email, "ada@example.com");
    }

    #[test]
    fn test_from_parts_falls_back_to_local_part() {
        let profile = Profile::from_parts(None, "ada@example.com");
        assert_eq!(profile.name, "ada");

        let profile = Profile::from_parts(Some("   ".into()), "grace@example.com");
        assert_eq!(profile.name, "grace");
    }
}
