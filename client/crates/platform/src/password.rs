//! Password Policies
//!
//! Two policies guard credentials before they leave the device:
//! - [`PasswordPolicy::Login`] checks an *existing* credential and only
//!   enforces a minimum length, so accounts created under older rules
//!   can still sign in.
//! - [`PasswordPolicy::Strong`] checks a *new* credential at sign-up:
//!   minimum length plus one lowercase letter, one uppercase letter,
//!   one digit and one symbol from [`PERMITTED_SYMBOLS`].
//!
//! Length is counted in UTF-16 code units, matching the identity service.
//!
//! Both are local pre-checks. The identity service re-validates.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum length accepted when signing in
pub const LOGIN_MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum length required when signing up
pub const SIGNUP_MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols that satisfy the strong policy's symbol requirement
pub const PERMITTED_SYMBOLS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Characters that end a line; never accepted in a new password
const LINE_TERMINATORS: &[char] = &['\n', '\r', '\u{2028}', '\u{2029}'];

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain a lowercase letter")]
    MissingLowercase,

    #[error("Password must contain an uppercase letter")]
    MissingUppercase,

    #[error("Password must contain a number")]
    MissingDigit,

    #[error("Password must contain one of @$!%*?&")]
    MissingSymbol,

    #[error("Password must not contain line breaks")]
    LineBreak,
}

// ============================================================================
// Policy
// ============================================================================

/// Which rule set a password is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicy {
    /// Existing credential: length only
    Login,
    /// New credential: length and character classes
    Strong,
}

impl PasswordPolicy {
    /// Check a raw password against this policy
    pub fn check(&self, raw: &str) -> Result<(), PasswordPolicyError> {
        let length = password_length(raw);

        match self {
            Self::Login => {
                if length < LOGIN_MIN_PASSWORD_LENGTH {
                    return Err(PasswordPolicyError::TooShort {
                        min: LOGIN_MIN_PASSWORD_LENGTH,
                        actual: length,
                    });
                }
                Ok(())
            }
            Self::Strong => {
                if raw.contains(LINE_TERMINATORS) {
                    return Err(PasswordPolicyError::LineBreak);
                }
                if !raw.chars().any(|c| c.is_ascii_lowercase()) {
                    return Err(PasswordPolicyError::MissingLowercase);
                }
                if !raw.chars().any(|c| c.is_ascii_uppercase()) {
                    return Err(PasswordPolicyError::MissingUppercase);
                }
                if !raw.chars().any(|c| c.is_ascii_digit()) {
                    return Err(PasswordPolicyError::MissingDigit);
                }
                if !raw.chars().any(|c| PERMITTED_SYMBOLS.contains(&c)) {
                    return Err(PasswordPolicyError::MissingSymbol);
                }
                if length < SIGNUP_MIN_PASSWORD_LENGTH {
                    return Err(PasswordPolicyError::TooShort {
                        min: SIGNUP_MIN_PASSWORD_LENGTH,
                        actual: length,
                    });
                }
                Ok(())
            }
        }
    }

    /// User-facing description of the rule set
    pub const fn requirement(&self) -> &'static str {
        match self {
            Self::Login => "Password must be at least 6 characters.",
            Self::Strong => {
                "Password must be at least 8 characters and include uppercase, lowercase, number, and special character."
            }
        }
    }
}

/// Password length in UTF-16 code units
pub fn password_length(raw: &str) -> usize {
    raw.encode_utf16().count()
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Lives only for the duration of one sign-in or sign-up call.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password, checked against `policy`
    ///
    /// The rejected input is wiped before the error is returned.
    pub fn new(raw: String, policy: PasswordPolicy) -> Result<Self, PasswordPolicyError> {
        let mut raw = raw;
        if let Err(e) = policy.check(&raw) {
            raw.zeroize();
            return Err(e);
        }
        Ok(Self(raw))
    }

    /// Borrow the password for the single request that needs it
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_policy_length_only() {
        assert!(PasswordPolicy::Login.check("abcdef").is_ok());
        assert!(PasswordPolicy::Login.check("weakpass").is_ok());
        assert_eq!(
            PasswordPolicy::Login.check("short"),
            Err(PasswordPolicyError::TooShort { min: 6, actual: 5 })
        );
    }

    #[test]
    fn test_strong_policy_accepts_complete_password() {
        assert!(PasswordPolicy::Strong.check("Strong1!").is_ok());
        assert!(PasswordPolicy::Strong.check("MySecure#Pass2024!").is_ok());
    }

    #[test]
    fn test_strong_policy_character_classes() {
        assert_eq!(
            PasswordPolicy::Strong.check("STRONG1!"),
            Err(PasswordPolicyError::MissingLowercase)
        );
        assert_eq!(
            PasswordPolicy::Strong.check("weakpass"),
            Err(PasswordPolicyError::MissingUppercase)
        );
        assert_eq!(
            PasswordPolicy::Strong.check("Strongg!"),
            Err(PasswordPolicyError::MissingDigit)
        );
        assert_eq!(
            PasswordPolicy::Strong.check("Strong12"),
            Err(PasswordPolicyError::MissingSymbol)
        );
    }

    #[test]
    fn test_strong_policy_symbol_must_be_permitted() {
        // '#' is not in the permitted set
        assert_eq!(
            PasswordPolicy::Strong.check("Strong1#"),
            Err(PasswordPolicyError::MissingSymbol)
        );
    }

    #[test]
    fn test_strong_policy_length() {
        assert_eq!(
            PasswordPolicy::Strong.check("Str1!x"),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 6 })
        );
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // 6 units, 18 bytes
        assert!(PasswordPolicy::Login.check("パスワード安").is_ok());
        assert!(PasswordPolicy::Login.check("パスワード").is_err());

        // Astral characters count twice
        assert_eq!(password_length("😀😀😀"), 6);
        assert!(PasswordPolicy::Login.check("😀😀😀").is_ok());
        assert!(PasswordPolicy::Login.check("😀😀").is_err());
        assert!(PasswordPolicy::Strong.check("Aa1!😀😀").is_ok());
        assert_eq!(
            PasswordPolicy::Strong.check("Aa1!😀"),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 6 })
        );
    }

    #[test]
    fn test_strong_policy_rejects_line_breaks() {
        let test_cases = ["Strong1!\n", "Str\rong1!", "Strong1!\u{2028}", "\u{2029}Strong1!"];

        for raw in test_cases {
            assert_eq!(
                PasswordPolicy::Strong.check(raw),
                Err(PasswordPolicyError::LineBreak),
                "password: {raw:?}"
            );
        }
        // Login only checks length
        assert!(PasswordPolicy::Login.check("secret\n").is_ok());
    }

    #[test]
    fn test_clear_text_password_new() {
        let password = ClearTextPassword::new("Strong1!".to_string(), PasswordPolicy::Strong);
        assert_eq!(password.unwrap().expose(), "Strong1!");

        let password = ClearTextPassword::new("weakpass".to_string(), PasswordPolicy::Strong);
        assert!(password.is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password =
            ClearTextPassword::new("secret-value".to_string(), PasswordPolicy::Login).unwrap();
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }

    #[test]
    fn test_requirement_messages() {
        assert_eq!(
            PasswordPolicy::Login.requirement(),
            "Password must be at least 6 characters."
        );
        assert!(PasswordPolicy::Strong.requirement().contains("uppercase"));
    }
}
