//! [`Authorizer`]: token check against a secret-store value.

use std::sync::Arc;

use common::protocol::{AccessDecision, AuthorizerEvent, AuthorizerResponse, Effect};
use common::SecretStore;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, warn};

use crate::policy::generate_policy;

/// Principal attached to every allow decision.
const ANY_PRINCIPAL: &str = "*";

/// Errors produced by the authorizer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Missing token, wrong token, or the secret could not be resolved.
    #[error("Unauthorized")]
    Unauthorized,
}

/// Validates presented tokens against a named secret.
///
/// Every check performs exactly one secret fetch; there is no cache and no
/// retry.
#[derive(Clone)]
pub struct Authorizer {
    secrets: Arc<dyn SecretStore>,
    secret_name: String,
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("secret_name", &self.secret_name)
            .finish_non_exhaustive()
    }
}

impl Authorizer {
    pub fn new(secrets: Arc<dyn SecretStore>, secret_name: impl Into<String>) -> Self {
        Self {
            secrets,
            secret_name: secret_name.into(),
        }
    }

    /// Name of the secret holding the expected token.
    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    /// Check `token` and produce the access decision for `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] when the secret cannot be fetched
    /// or when `token` does not equal it exactly.
    pub async fn authorize(&self, token: &str, resource: &str) -> Result<AccessDecision, AuthError> {
        let expected = match self.secrets.fetch_secret(&self.secret_name).await {
            Ok(v) => v,
            Err(e) => {
                warn!(secret = %self.secret_name, error = %e, "secret fetch failed; rejecting request");
                return Err(AuthError::Unauthorized);
            }
        };

        if !tokens_match(token, &expected) {
            warn!(resource, "token mismatch; rejecting request");
            return Err(AuthError::Unauthorized);
        }

        debug!(resource, "token accepted");
        Ok(AccessDecision {
            principal: ANY_PRINCIPAL.into(),
            effect: Effect::Allow,
            resource: resource.to_owned(),
        })
    }

    /// Authorize a gateway event and return the policy to hand back.
    ///
    /// The token is taken from the `token_header` header (any case), falling
    /// back to `authorizationToken` for TOKEN-type events.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] if the event carries no token or
    /// if [`Authorizer::authorize`] rejects it.
    pub async fn handle_event(
        &self,
        event: &AuthorizerEvent,
        token_header: &str,
    ) -> Result<AuthorizerResponse, AuthError> {
        let token = event
            .header(token_header)
            .or(event.authorization_token.as_deref())
            .ok_or_else(|| {
                warn!(header = token_header, "authorizer event carries no token");
                AuthError::Unauthorized
            })?;

        let decision = self.authorize(token, &event.method_arn).await?;
        Ok(generate_policy(
            &decision.principal,
            decision.effect,
            &decision.resource,
        ))
    }
}

/// Exact byte equality in constant time for equal-length inputs.
fn tokens_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).unwrap_u8() == 1
}
