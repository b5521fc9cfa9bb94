//! Identity Gateway Contract
//!
//! Interface to the external identity service. Implementations are in the
//! infrastructure layer; the auth controller is the only caller.

use thiserror::Error;

use crate::domain::entity::profile::Profile;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, federated_provider::FederatedProvider,
};
use platform::password::ClearTextPassword;

/// Gateway result type alias
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures reported by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The service answered and refused the request
    #[error("identity service rejected request: {0}")]
    Rejected(String),

    /// The service could not be reached
    #[error("identity service unreachable: {0}")]
    Unreachable(String),
}

/// Identity gateway trait
#[trait_variant::make(IdentityGateway: Send)]
pub trait LocalIdentityGateway {
    /// Sign in an existing account
    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> GatewayResult<Profile>;

    /// Create an account and sign it in
    async fn sign_up_with_password(
        &self,
        name: &DisplayName,
        email: &Email,
        password: &ClearTextPassword,
    ) -> GatewayResult<Profile>;

    /// Run the provider's federated flow
    async fn sign_in_with_federated_provider(
        &self,
        provider: FederatedProvider,
    ) -> GatewayResult<Profile>;

    /// Invalidate the service-side session (best-effort)
    async fn sign_out(&self) -> GatewayResult<()>;

    /// Profile of the session the service still holds, if any
    async fn current_profile(&self) -> GatewayResult<Option<Profile>>;
}
