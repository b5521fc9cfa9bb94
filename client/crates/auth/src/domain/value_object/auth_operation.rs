//! Auth Operation
//!
//! Names the controller operation an event or failure belongs to.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Login,
    Signup,
    FederatedLogin,
    Logout,
    /// Startup resolution of `Initializing`
    Restore,
}

impl AuthOperation {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::FederatedLogin => "federated_login",
            Self::Logout => "logout",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for AuthOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
