//! Auth Controller
//!
//! The only component that talks to the identity gateway and the only
//! writer of the session store. Each operation lives in its own module
//! (`sign_in`, `sign_up`, `sign_out`, `check_session`) as an `impl` block
//! on [`AuthController`].
//!
//! Operations are not coalesced or cancelled. Whichever transition is
//! applied last determines the session (last-write-wins).

use std::sync::Arc;

use crate::application::session_store::SessionStore;
use crate::domain::entity::{profile::Profile, session::Session};
use crate::domain::gateway::{GatewayResult, IdentityGateway};
use crate::domain::value_object::auth_operation::AuthOperation;
use crate::error::{AuthError, AuthResult};

/// Auth controller
pub struct AuthController<G>
where
    G: IdentityGateway,
{
    pub(crate) gateway: Arc<G>,
    pub(crate) store: SessionStore,
}

impl<G> Clone for AuthController<G>
where
    G: IdentityGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            store: self.store.clone(),
        }
    }
}

impl<G> AuthController<G>
where
    G: IdentityGateway,
{
    pub fn new(gateway: Arc<G>, store: SessionStore) -> Self {
        Self { gateway, store }
    }

    /// Read handle to the store this controller writes
    pub fn session_store(&self) -> SessionStore {
        self.store.clone()
    }

    /// Current session snapshot
    pub fn session(&self) -> Session {
        self.store.snapshot()
    }

    /// Clear a stale error once an attempt passes local validation
    pub(crate) fn begin_attempt(&self) -> AuthResult<()> {
        if self.store.snapshot().error.is_some() {
            self.store.update(|s| s.clone().without_error())?;
        }
        Ok(())
    }

    /// Apply a gateway outcome for a sign-in style operation
    ///
    /// Success replaces the session with `Authenticated`. Failure only
    /// records the error on whatever session is current now.
    pub(crate) fn settle(
        &self,
        operation: AuthOperation,
        outcome: GatewayResult<Profile>,
    ) -> AuthResult<Profile> {
        match outcome {
            Ok(profile) => {
                self.store.transition(Session::authenticated(profile.clone()))?;
                tracing::info!(
                    operation = %operation,
                    email = %profile.email,
                    "User signed in"
                );
                Ok(profile)
            }
            Err(e) => {
                let err = AuthError::from(e);
                err.log();
                self.store.update(|s| s.clone().with_error(err.clone()))?;
                Err(err)
            }
        }
    }

    /// Local validation failure: log only, never touch the store
    pub(crate) fn reject_locally(&self, operation: AuthOperation, err: AuthError) -> AuthError {
        tracing::debug!(
            operation = %operation,
            reason = %err.reason(),
            "Rejected before gateway call"
        );
        err
    }
}
