//! Configuration loading and validation for the authorizer sidecar.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated authorizer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Secrets Manager name or ARN of the shared API key. **Required.**
    pub secret_name: String,

    /// Event header that carries the caller's token.
    #[serde(default = "default_token_header")]
    pub token_header: String,

    /// TCP port the sidecar listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Secrets Manager endpoint override (local stacks).
    #[serde(default)]
    pub aws_endpoint_url: Option<String>,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_token_header() -> String {
    "x-api-key".into()
}
fn default_listen_port() -> u16 {
    9000
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build authorizer configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise authorizer configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.secret_name.trim().is_empty() {
            anyhow::bail!("SECRET_NAME is required and must not be empty");
        }
        if self.token_header.trim().is_empty() {
            anyhow::bail!("TOKEN_HEADER must not be empty");
        }
        Ok(())
    }
}
