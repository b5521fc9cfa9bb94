//! Sign In Use Cases
//!
//! Email/password sign-in and federated sign-in.

use platform::password::{ClearTextPassword, PasswordPolicy};

use crate::application::controller::AuthController;
use crate::domain::entity::{profile::Profile, session::SessionStatus};
use crate::domain::gateway::IdentityGateway;
use crate::domain::value_object::{
    auth_operation::AuthOperation, email::Email, federated_provider::FederatedProvider,
};
use crate::error::{AuthError, AuthResult, ValidationField};

/// Shown when federated sign-in is attempted from an authenticated session
pub const ALREADY_SIGNED_IN_MESSAGE: &str = "You are already signed in.";

/// Shown when federated sign-in is attempted before startup resolution
pub const SESSION_LOADING_MESSAGE: &str = "Session is still loading, try again in a moment.";

impl<G> AuthController<G>
where
    G: IdentityGateway,
{
    /// Sign in with email and password
    ///
    /// Only the permissive login policy (length) is checked locally, so
    /// passwords created under older rules keep working.
    pub async fn login(
        &self,
        email: impl AsRef<str>,
        password: impl Into<String>,
    ) -> AuthResult<Profile> {
        let op = AuthOperation::Login;

        let email = Email::new(email).map_err(|e| self.reject_locally(op, e))?;
        let password = ClearTextPassword::new(password.into(), PasswordPolicy::Login)
            .map_err(|_| {
                self.reject_locally(
                    op,
                    AuthError::ValidationFailed(
                        ValidationField::Password,
                        PasswordPolicy::Login.requirement().to_string(),
                    ),
                )
            })?;

        self.begin_attempt()?;
        let outcome = self.gateway.sign_in_with_password(&email, &password).await;
        if outcome.is_err() {
            tracing::warn!(email = %email, "Sign-in failed");
        }
        self.settle(op, outcome)
    }

    /// Sign in through the Google federated flow
    ///
    /// Only accepted while signed out, so a federated failure can never
    /// disturb an authenticated session.
    pub async fn login_with_google(&self) -> AuthResult<Profile> {
        self.login_with_provider(FederatedProvider::Google).await
    }

    pub async fn login_with_provider(&self, provider: FederatedProvider) -> AuthResult<Profile> {
        let op = AuthOperation::FederatedLogin;

        match self.store.status() {
            SessionStatus::Unauthenticated => {}
            SessionStatus::Authenticated => {
                return Err(self.reject_locally(
                    op,
                    AuthError::ValidationFailed(
                        ValidationField::Session,
                        ALREADY_SIGNED_IN_MESSAGE.to_string(),
                    ),
                ));
            }
            SessionStatus::Initializing => {
                return Err(self.reject_locally(
                    op,
                    AuthError::ValidationFailed(
                        ValidationField::Session,
                        SESSION_LOADING_MESSAGE.to_string(),
                    ),
                ));
            }
        }

        self.begin_attempt()?;
        let outcome = self.gateway.sign_in_with_federated_provider(provider).await;
        if outcome.is_err() {
            tracing::warn!(provider = %provider, "Federated sign-in failed");
        }
        self.settle(op, outcome)
    }
}
