//! In-Memory Identity Gateway
//!
//! Offline identity service used by the dashboard when no API key is
//! configured, and by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use platform::password::ClearTextPassword;

use crate::domain::entity::profile::Profile;
use crate::domain::gateway::{GatewayError, GatewayResult, IdentityGateway};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, federated_provider::FederatedProvider,
};

/// Rejection for unknown email or wrong password
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Rejection for sign-up with a registered email
pub const EMAIL_IN_USE: &str = "email already in use";

struct Account {
    profile: Profile,
    password: String,
}

#[derive(Default)]
struct State {
    /// Keyed by canonical (lower-cased) email
    accounts: HashMap<String, Account>,
    current: Option<Profile>,
    federated: Option<Profile>,
}

/// In-memory identity gateway
#[derive(Default)]
pub struct InMemoryIdentityGateway {
    state: Mutex<State>,
    unreachable: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryIdentityGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account
    pub fn with_account(
        self,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let email = email.into();
        {
            let mut state = self.lock();
            state.accounts.insert(
                email.to_lowercase(),
                Account {
                    profile: Profile::new(name, email),
                    password: password.into(),
                },
            );
        }
        self
    }

    /// Profile returned by the federated flow; without one the flow is
    /// cancelled
    pub fn with_federated_profile(self, profile: Profile) -> Self {
        self.lock().federated = Some(profile);
        self
    }

    /// Session the service still holds from a previous run
    pub fn with_current_profile(self, profile: Profile) -> Self {
        self.lock().current = Some(profile);
        self
    }

    /// Toggle simulated network failure
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Number of gateway operations invoked so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the call and fail if the network is down
    fn enter(&self, operation: &'static str) -> GatewayResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.load(Ordering::SeqCst) {
            tracing::debug!(operation, "In-memory gateway simulating network failure");
            return Err(GatewayError::Unreachable("network request failed".to_string()));
        }
        Ok(())
    }
}

impl IdentityGateway for InMemoryIdentityGateway {
    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> GatewayResult<Profile> {
        self.enter("sign_in_with_password")?;

        let mut state = self.lock();
        let profile = match state.accounts.get(&email.canonical()) {
            Some(account) if account.password == password.expose() => account.profile.clone(),
            _ => return Err(GatewayError::Rejected(INVALID_CREDENTIALS.to_string())),
        };
        state.current = Some(profile.clone());
        Ok(profile)
    }

    async fn sign_up_with_password(
        &self,
        name: &DisplayName,
        email: &Email,
        password: &ClearTextPassword,
    ) -> GatewayResult<Profile> {
        self.enter("sign_up_with_password")?;

        let mut state = self.lock();
        let key = email.canonical();
        if state.accounts.contains_key(&key) {
            return Err(GatewayError::Rejected(EMAIL_IN_USE.to_string()));
        }

        let profile = Profile::new(name.as_str(), email.as_str());
        state.accounts.insert(
            key,
            Account {
                profile: profile.clone(),
                password: password.expose().to_string(),
            },
        );
        state.current = Some(profile.clone());
        Ok(profile)
    }

    async fn sign_in_with_federated_provider(
        &self,
        provider: FederatedProvider,
    ) -> GatewayResult<Profile> {
        self.enter("sign_in_with_federated_provider")?;

        let mut state = self.lock();
        let profile = state.federated.clone().ok_or_else(|| {
            GatewayError::Rejected(format!("{} sign-in was cancelled", provider.label()))
        })?;
        state.current = Some(profile.clone());
        Ok(profile)
    }

    async fn sign_out(&self) -> GatewayResult<()> {
        self.enter("sign_out")?;
        self.lock().current = None;
        Ok(())
    }

    async fn current_profile(&self) -> GatewayResult<Option<Profile>> {
        self.enter("current_profile")?;
        Ok(self.lock().current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::PasswordPolicy;

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    fn password(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string(), PasswordPolicy::Login).unwrap()
    }

    fn gateway() -> InMemoryIdentityGateway {
        InMemoryIdentityGateway::new().with_account("Ada", "ada@example.com", "Secret1!")
    }

    #[tokio::test]
    async fn test_sign_in_matches_case_insensitive_email() {
        let gw = gateway();
        let profile = gw
            .sign_in_with_password(&email("ADA@Example.com"), &password("Secret1!"))
            .await
            .unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(gw.current_profile().await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_sign_in_uniform_rejection() {
        let gw = gateway();
        let wrong_password = gw
            .sign_in_with_password(&email("ada@example.com"), &password("wrong-pass"))
            .await
            .unwrap_err();
        let unknown = gw
            .sign_in_with_password(&email("bob@example.com"), &password("Secret1!"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password, GatewayError::Rejected(INVALID_CREDENTIALS.into()));
        assert_eq!(wrong_password, unknown);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_existing_email() {
        let gw = gateway();
        let name = DisplayName::new("Ada Again").unwrap();
        let err = gw
            .sign_up_with_password(&name, &email("Ada@example.com"), &password("Secret2!"))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Rejected(EMAIL_IN_USE.into()));
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let gw = InMemoryIdentityGateway::new();
        let name = DisplayName::new("Grace").unwrap();
        gw.sign_up_with_password(&name, &email("grace@example.com"), &password("Strong1!"))
            .await
            .unwrap();
        gw.sign_out().await.unwrap();
        assert_eq!(gw.current_profile().await.unwrap(), None);

        let profile = gw
            .sign_in_with_password(&email("grace@example.com"), &password("Strong1!"))
            .await
            .unwrap();
        assert_eq!(profile.name, "Grace");
    }

    #[tokio::test]
    async fn test_federated_without_profile_is_cancelled() {
        let gw = InMemoryIdentityGateway::new();
        let err = gw
            .sign_in_with_federated_provider(FederatedProvider::Google)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(_)));

        let gw = gw.with_federated_profile(Profile::new("Lin", "lin@example.com"));
        let profile = gw
            .sign_in_with_federated_provider(FederatedProvider::Google)
            .await
            .unwrap();
        assert_eq!(profile.email, "lin@example.com");
    }

    #[tokio::test]
    async fn test_unreachable_counts_calls() {
        let gw = gateway();
        gw.set_unreachable(true);

        let err = gw.current_profile().await.unwrap_err();
        assert!(matches!(err, GatewayError::Unreachable(_)));
        assert!(gw.sign_out().await.is_err());
        assert_eq!(gw.calls(), 2);
    }
}
