//! Common types, wire formats, errors, and secret resolution shared across
//! the `items-api` workspace crates.

pub mod error;
pub mod protocol;
pub mod secrets;

pub use error::ServiceError;
pub use secrets::{SecretError, SecretStore};
