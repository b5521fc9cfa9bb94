//! Federated Identity Providers

use std::fmt;

/// Third-party provider used for federated sign-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FederatedProvider {
    #[default]
    Google,
}

impl FederatedProvider {
    /// Provider id understood by the identity service
    #[inline]
    pub const fn provider_id(&self) -> &'static str {
        match self {
            Self::Google => "google.com",
        }
    }

    /// Name shown to users
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Google => "Google",
        }
    }
}

impl fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.provider_id())
    }
}
