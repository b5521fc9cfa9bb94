//! Domain Entities

pub mod profile;
pub mod session;
