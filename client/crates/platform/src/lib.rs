//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password policies (login and strong signup policy)
//! - Zeroize-on-drop clear text password wrapper
//! - Environment-based configuration helpers

pub mod config;
pub mod password;
