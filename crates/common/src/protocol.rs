//! Request and response types exchanged between components.
//!
//! These types are serialised as JSON over the public items API, the
//! authorizer sidecar, and the gateway boundary between them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceError;

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// The single managed resource.
///
/// `id` is assigned by the store on creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Request body for `POST /items` and `PUT /items/{id}`.
///
/// Any other field in the body, `id` included, is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Error responses
// ---------------------------------------------------------------------------

/// Error body returned by the items API on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description safe to expose to callers.
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Body returned when the gateway rejects a request before it reaches the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    pub message: String,
}

impl From<&ServiceError> for GatewayMessage {
    fn from(e: &ServiceError) -> Self {
        Self { message: e.detail() }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status, always `"ok"` when the process answers.
    pub status: String,
    /// Number of items currently held, when the responder owns a store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// Per-request access decision. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub principal: String,
    pub effect: Effect,
    pub resource: String,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        self.effect == Effect::Allow
    }
}

/// Authorizer invocation as delivered by an API gateway.
///
/// REQUEST-type events carry the token in `headers`; TOKEN-type events carry
/// it in `authorizationToken`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerEvent {
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_token: Option<String>,
    pub method_arn: String,
}

impl AuthorizerEvent {
    /// Look up a header by name. An exact-case key wins; otherwise the
    /// lexicographically smallest key matching without ASCII case is used.
    pub fn header(&self, name: &str) -> Option<&str> {
        if let Some(v) = self.headers.get(name) {
            return Some(v.as_str());
        }
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, v)| v.as_str())
    }
}

/// IAM-style policy returned to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub action: String,
    pub effect: Effect,
    pub resource: String,
}
