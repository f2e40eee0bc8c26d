//! Secret resolution: fetch a secret value by name from an external store.
//!
//! The store is an injected collaborator. Production code talks to AWS
//! Secrets Manager through [`SecretsManagerStore`]; tests and local runs use
//! [`StaticSecrets`].
//!
//! Secret values are never logged.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use thiserror::Error;
use tracing::debug;

/// Errors produced while resolving a secret.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The store has no secret with this name.
    #[error("secret not found: {0}")]
    NotFound(String),

    /// The secret exists but holds binary data instead of a string.
    #[error("secret {0} has no string value")]
    NotString(String),

    /// Transport, credential, or any other client-side failure.
    #[error("failed to fetch secret {name}: {message}")]
    Fetch { name: String, message: String },
}

/// A source of named secret strings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the current string value of the secret called `name`.
    ///
    /// One call is one request against the backing store; nothing is cached.
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError>;
}

// ---------------------------------------------------------------------------
// AWS Secrets Manager
// ---------------------------------------------------------------------------

/// [`SecretStore`] backed by AWS Secrets Manager.
#[derive(Clone, Debug)]
pub struct SecretsManagerStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManagerStore {
    /// Build a client from the standard AWS credential and region chain.
    ///
    /// `endpoint_url` overrides the service endpoint, e.g. for a local stack.
    pub async fn init(endpoint_url: Option<&str>) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;

        let mut builder = aws_sdk_secretsmanager::config::Builder::from(&config);
        if let Some(url) = endpoint_url {
            builder = builder.endpoint_url(url);
        }

        Self {
            client: aws_sdk_secretsmanager::Client::from_conf(builder.build()),
        }
    }
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError> {
        let resp = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| {
                let not_found = e
                    .as_service_error()
                    .is_some_and(|se| se.is_resource_not_found_exception());
                if not_found {
                    SecretError::NotFound(name.to_owned())
                } else {
                    SecretError::Fetch {
                        name: name.to_owned(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                }
            })?;

        debug!(secret = %name, "secret fetched from Secrets Manager");

        resp.secret_string()
            .map(str::to_owned)
            .ok_or_else(|| SecretError::NotString(name.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Fixed in-memory secrets, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct StaticSecrets {
    values: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a secret.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl SecretStore for StaticSecrets {
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn static_secrets_lookup() {
        let store = StaticSecrets::new().with("api-key", "s3cr3t");
        assert_eq!(store.fetch_secret("api-key").await.unwrap(), "s3cr3t");
        assert!(matches!(
            store.fetch_secret("other").await,
            Err(SecretError::NotFound(n)) if n == "other"
        ));
    }

    #[tokio::test]
    async fn static_secrets_later_value_wins() {
        let store = StaticSecrets::new().with("k", "one").with("k", "two");
        assert_eq!(store.fetch_secret("k").await.unwrap(), "two");
    }

    #[tokio::test]
    async fn trait_object_dispatch() {
        let mut mock = MockSecretStore::new();
        mock.expect_fetch_secret()
            .with(eq("db-url"))
            .times(1)
            .returning(|_| Ok("postgres://db/items".into()));

        let store: Box<dyn SecretStore> = Box::new(mock);
        assert_eq!(
            store.fetch_secret("db-url").await.unwrap(),
            "postgres://db/items"
        );
    }

    #[test]
    fn fetch_error_names_secret() {
        let e = SecretError::Fetch {
            name: "api-key".into(),
            message: "dispatch failure".into(),
        };
        let s = e.to_string();
        assert!(s.contains("api-key"));
        assert!(s.contains("dispatch failure"));
    }
}
