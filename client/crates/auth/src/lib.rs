//! Auth (Authentication) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session and profile entities, credential value objects, gateway trait
//! - `application/` - Session store, auth controller and its use cases
//! - `infra/` - Identity gateway implementations (REST and in-memory)
//! - `presentation/` - Route guard, navigator, view models
//!
//! ## Features
//! - Email/password sign-in and sign-up, Google federated sign-in
//! - Optimistic sign-out
//! - Startup session resolution
//! - Guarded routes that follow the session as it changes
//!
//! ## Session Model
//! - One session store per process; the auth controller is its only writer
//! - `user` is present if and only if the status is `Authenticated`
//! - `Initializing` is left once and never re-entered
//! - Concurrent operations are not coalesced: the last transition wins

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, AuthController, SessionStore, Subscription};
pub use domain::{GatewayError, IdentityGateway, Profile, Session, SessionStatus};
pub use error::{AuthError, AuthResult, ValidationField};
pub use infra::{IdentityToolkitGateway, InMemoryIdentityGateway};
pub use presentation::{AuthContext, Navigator, Notice, RouteDecision, View};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod guard {
    pub use crate::presentation::route_guard::*;
}
