//! Check Session Use Case
//!
//! Resolves `Initializing` once at startup from the gateway's current
//! profile.

use crate::application::controller::AuthController;
use crate::domain::entity::session::{Session, SessionStatus};
use crate::domain::gateway::IdentityGateway;
use crate::error::{AuthError, AuthResult};

impl<G> AuthController<G>
where
    G: IdentityGateway,
{
    /// Resolve the startup session
    ///
    /// A gateway failure resolves to `Unauthenticated` with the error
    /// recorded. If another operation already moved the store out of
    /// `Initializing`, nothing is applied.
    pub async fn resolve_initial_session(&self) -> AuthResult<SessionStatus> {
        if self.store.status().is_resolved() {
            return Ok(self.store.status());
        }

        let outcome = self.gateway.current_profile().await;

        let next = match outcome {
            Ok(Some(profile)) => Session::authenticated(profile),
            Ok(None) => Session::unauthenticated(),
            Err(e) => {
                let err = AuthError::from(e);
                err.log();
                Session::unauthenticated().with_error(err)
            }
        };

        // An operation may have completed while the gateway was answering
        let status = next.status;
        let applied = self
            .store
            .update_if(|current| (!current.status.is_resolved()).then_some(next))?;
        if !applied {
            let status = self.store.status();
            tracing::debug!(
                status = %status,
                "Startup resolution skipped, session already resolved"
            );
            return Ok(status);
        }

        tracing::info!(status = %status, "Startup session resolved");
        Ok(status)
    }
}
