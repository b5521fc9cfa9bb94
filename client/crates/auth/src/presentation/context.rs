//! Auth Context
//!
//! What the view layer is given: a session snapshot plus the four
//! controller operations.

use crate::application::controller::AuthController;
use crate::application::session_store::Subscription;
use crate::domain::entity::{profile::Profile, session::Session};
use crate::domain::gateway::IdentityGateway;
use crate::error::AuthResult;

/// Auth context handed to views
pub struct AuthContext<G>
where
    G: IdentityGateway,
{
    controller: AuthController<G>,
}

impl<G> Clone for AuthContext<G>
where
    G: IdentityGateway,
{
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
        }
    }
}

impl<G> AuthContext<G>
where
    G: IdentityGateway,
{
    pub fn new(controller: AuthController<G>) -> Self {
        Self { controller }
    }

    /// Current session snapshot
    pub fn use_session(&self) -> Session {
        self.controller.session()
    }

    /// Observe session changes
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        self.controller.session_store().subscribe(listener)
    }

    pub async fn login(
        &self,
        email: impl AsRef<str>,
        password: impl Into<String>,
    ) -> AuthResult<Profile> {
        self.controller.login(email, password).await
    }

    pub async fn signup(
        &self,
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        password: impl Into<String>,
    ) -> AuthResult<Profile> {
        self.controller.signup(name, email, password).await
    }

    pub async fn login_with_google(&self) -> AuthResult<Profile> {
        self.controller.login_with_google().await
    }

    pub async fn logout(&self) -> AuthResult<()> {
        self.controller.logout().await
    }

    pub fn controller(&self) -> &AuthController<G> {
        &self.controller
    }
}
