//! Application Layer
//!
//! Session store, auth controller and its use cases.

pub mod check_session;
pub mod config;
pub mod controller;
pub mod session_store;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use controller::AuthController;
pub use session_store::{SessionStore, Subscription};
pub use sign_in::{ALREADY_SIGNED_IN_MESSAGE, SESSION_LOADING_MESSAGE};
