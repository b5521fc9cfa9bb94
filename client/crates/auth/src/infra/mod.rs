//! Infrastructure Layer
//!
//! Identity gateway implementations.

pub mod identity_toolkit;
pub mod memory;

pub use identity_toolkit::IdentityToolkitGateway;
pub use memory::InMemoryIdentityGateway;
