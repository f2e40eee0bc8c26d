//! Configuration loading and validation for the items API.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use axum::http::HeaderName;
use serde::Deserialize;

/// Resource prefix used when no gateway stage ARN is configured.
pub const DEFAULT_METHOD_ARN_PREFIX: &str = "arn:aws:execute-api:local:000000000000:items-api/dev";

/// Validated items API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection string. **Required.**
    pub db_url: String,

    /// Secret whose value replaces `db_url` when set.
    #[serde(default)]
    pub secret_name: Option<String>,

    /// Secret holding the shared API key. **Required.**
    pub api_key_secret_name: String,

    /// Header carrying the caller's API key.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Path prefix for all item routes.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix of the resource identifier handed to the authorizer.
    #[serde(default = "default_method_arn_prefix")]
    pub method_arn_prefix: String,

    /// Secrets Manager endpoint override (local stacks).
    #[serde(default)]
    pub aws_endpoint_url: Option<String>,

    /// OTLP collector endpoint. Span export is off when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_key_header() -> String {
    "x-api-key".into()
}
fn default_api_prefix() -> String {
    "/v1".into()
}
fn default_port() -> u16 {
    8000
}
fn default_method_arn_prefix() -> String {
    DEFAULT_METHOD_ARN_PREFIX.into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The API key header as a typed header name.
    ///
    /// # Errors
    ///
    /// Returns an error if `API_KEY_HEADER` is not a valid header name.
    pub fn api_key_header_name(&self) -> Result<HeaderName> {
        HeaderName::try_from(self.api_key_header.as_str())
            .with_context(|| format!("API_KEY_HEADER {:?} is not a valid header name", self.api_key_header))
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.db_url, "DB_URL")?;
        ensure_non_empty(&self.api_key_secret_name, "API_KEY_SECRET_NAME")?;
        ensure_non_empty(&self.method_arn_prefix, "METHOD_ARN_PREFIX")?;
        if let Some(name) = &self.secret_name {
            ensure_non_empty(name, "SECRET_NAME")?;
        }
        self.api_key_header_name()?;

        if !self.api_prefix.starts_with('/') || self.api_prefix.len() < 2 {
            anyhow::bail!("API_PREFIX must start with '/' and name at least one segment");
        }
        if self.api_prefix.ends_with('/') {
            anyhow::bail!("API_PREFIX must not end with '/'");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
