//! Value Objects

pub mod auth_operation;
pub mod display_name;
pub mod email;
pub mod federated_provider;
