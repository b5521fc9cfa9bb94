//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the dashboard vocabulary:
//! - Error classification shared by every crate ([`error::kind::ErrorKind`])
//! - The user-facing error type ([`error::app_error::AppError`])
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
