//! Sign Out Use Case
//!
//! Local state is cleared first; the gateway call is best-effort.

use crate::application::controller::AuthController;
use crate::domain::entity::session::Session;
use crate::domain::gateway::IdentityGateway;
use crate::error::AuthResult;

impl<G> AuthController<G>
where
    G: IdentityGateway,
{
    /// Sign out
    ///
    /// Transitions to `Unauthenticated` before contacting the gateway. A
    /// gateway failure is logged and does not fail the call.
    pub async fn logout(&self) -> AuthResult<()> {
        let was = self.store.status();
        self.store.transition(Session::unauthenticated())?;
        tracing::info!(from = %was, "User signed out");

        if let Err(e) = self.gateway.sign_out().await {
            tracing::warn!(error = %e, "Gateway sign-out failed, local session already cleared");
        }

        Ok(())
    }
}
