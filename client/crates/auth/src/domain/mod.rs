//! Domain Layer
//!
//! Contains the session entity, credential value objects, and the
//! identity gateway contract.

pub mod entity;
pub mod gateway;
pub mod value_object;

// Re-exports
pub use entity::{profile::Profile, session::Session, session::SessionStatus};
pub use gateway::{GatewayError, GatewayResult, IdentityGateway};
