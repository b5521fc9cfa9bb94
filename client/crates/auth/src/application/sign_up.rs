//! Sign Up Use Case
//!
//! Creates a new account and signs it in.

use platform::password::{ClearTextPassword, PasswordPolicy};

use crate::application::controller::AuthController;
use crate::domain::entity::profile::Profile;
use crate::domain::gateway::IdentityGateway;
use crate::domain::value_object::{
    auth_operation::AuthOperation, display_name::DisplayName, email::Email,
};
use crate::error::{AuthError, AuthResult, ValidationField};

impl<G> AuthController<G>
where
    G: IdentityGateway,
{
    /// Create an account
    ///
    /// Name, email and the strong password policy are checked locally
    /// first (in that order); any failure returns `ValidationFailed`
    /// without a gateway call.
    pub async fn signup(
        &self,
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        password: impl Into<String>,
    ) -> AuthResult<Profile> {
        let op = AuthOperation::Signup;

        let name = DisplayName::new(name).map_err(|e| self.reject_locally(op, e))?;
        let email = Email::new(email).map_err(|e| self.reject_locally(op, e))?;
        let password = ClearTextPassword::new(password.into(), PasswordPolicy::Strong)
            .map_err(|e| {
                tracing::debug!(rule = %e, "Strong password policy not met");
                self.reject_locally(
                    op,
                    AuthError::ValidationFailed(
                        ValidationField::Password,
                        PasswordPolicy::Strong.requirement().to_string(),
                    ),
                )
            })?;

        self.begin_attempt()?;
        let outcome = self
            .gateway
            .sign_up_with_password(&name, &email, &password)
            .await;

        if let Ok(profile) = &outcome {
            tracing::info!(email = %email, name = %profile.name, "User signed up");
        } else {
            tracing::warn!(email = %email, "Sign-up failed");
        }

        self.settle(op, outcome)
    }
}
