//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use authorizer::Authorizer;
use axum::http::HeaderName;

use crate::config::DEFAULT_METHOD_ARN_PREFIX;
use crate::db::Database;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable so that Axum can clone the state for each
/// request.
#[derive(Clone)]
pub struct AppState {
    /// Item database; handlers acquire one session per request.
    pub db: Database,
    /// Shared-secret token check run by the gateway middleware.
    pub authorizer: Arc<Authorizer>,
    /// Header carrying the caller's API key.
    pub api_key_header: HeaderName,
    /// Prefix of the resource identifier passed to the authorizer.
    pub method_arn_prefix: Arc<String>,
}

impl AppState {
    /// Create a new [`AppState`] with the default header and resource prefix.
    pub fn new(db: Database, authorizer: Authorizer) -> Self {
        Self {
            db,
            authorizer: Arc::new(authorizer),
            api_key_header: HeaderName::from_static("x-api-key"),
            method_arn_prefix: Arc::new(DEFAULT_METHOD_ARN_PREFIX.into()),
        }
    }

    pub fn with_api_key_header(mut self, header: HeaderName) -> Self {
        self.api_key_header = header;
        self
    }

    pub fn with_method_arn_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.method_arn_prefix = Arc::new(prefix.into());
        self
    }
}
