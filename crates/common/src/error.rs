//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Unauthorized`] → 401
/// - [`ServiceError::Forbidden`] → 403
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::InvalidInput`] → 422
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be read at all, e.g. a malformed gateway event.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing token, wrong token, or the secret behind it was unavailable.
    #[error("Unauthorized")]
    Unauthorized,

    /// The credential was checked and access was explicitly denied.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The path or body failed validation before reaching the store.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Unauthorized => 401,
            ServiceError::Forbidden(_) => 403,
            ServiceError::NotFound(_) => 404,
            ServiceError::InvalidInput(_) => 422,
        }
    }

    /// Message safe to expose to callers in a response body.
    pub fn detail(&self) -> String {
        match self {
            ServiceError::BadRequest(m)
            | ServiceError::Forbidden(m)
            | ServiceError::NotFound(m)
            | ServiceError::InvalidInput(m) => m.clone(),
            ServiceError::Unauthorized => "Unauthorized".into(),
        }
    }
}
