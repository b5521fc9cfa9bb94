//! Session Entity
//!
//! The process-wide record of authentication status and current user.
//!
//! ## Invariants
//! - `user` is `Some` if and only if `status == Authenticated`
//! - `Initializing` is the starting status and is never re-entered once left

use std::fmt;

use crate::domain::entity::profile::Profile;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// SessionStatus
// ============================================================================

/// Authentication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Startup: the identity service has not answered yet
    #[default]
    Initializing,

    /// No signed-in user
    Unauthenticated,

    /// A user is signed in
    Authenticated,
}

impl SessionStatus {
    /// Get string code for logging
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
        }
    }

    /// Whether startup resolution has happened
    #[inline]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Initializing)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Session
// ============================================================================

/// Session value held by the session store
///
/// Replaced as a whole on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub status: SessionStatus,
    pub user: Option<Profile>,
    /// Failure of the last operation, cleared by the next attempt
    pub error: Option<AuthError>,
}

impl Session {
    /// Startup session
    pub fn initializing() -> Self {
        Self::default()
    }

    /// Signed-out session
    pub fn unauthenticated() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            user: None,
            error: None,
        }
    }

    /// Signed-in session for `profile`
    pub fn authenticated(profile: Profile) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            user: Some(profile),
            error: None,
        }
    }

    /// Same status and user, with `error` recorded
    pub fn with_error(self, error: AuthError) -> Self {
        Self {
            error: Some(error),
            ..self
        }
    }

    /// Same status and user, error cleared
    pub fn without_error(self) -> Self {
        Self {
            error: None,
            ..self
        }
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// Check the status/user invariant
    pub fn check_invariant(&self) -> AuthResult<()> {
        match (self.status, &self.user) {
            (SessionStatus::Authenticated, None) => Err(AuthError::InvalidStateTransition(
                "authenticated session without a user".to_string(),
            )),
            (status, Some(_)) if status != SessionStatus::Authenticated => {
                Err(AuthError::InvalidStateTransition(format!(
                    "user present while {status}"
                )))
            }
            _ => Ok(()),
        }
    }
}
