//! Axum middleware applied to the router.
//!
//! [`require_api_key`] stands in for the API gateway: it runs the authorizer
//! before any item handler and answers with the gateway's own 401/403 bodies
//! when the check fails.

use std::time::Duration;

use axum::{
    extract::{OriginalUri, Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use authorizer::AuthError;
use common::protocol::{AccessDecision, GatewayMessage};
use common::ServiceError;
use tracing::debug;

use super::state::AppState;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Reject the request unless the API key header passes the authorizer.
///
/// - no usable header → 401, the authorizer is not consulted
/// - authorizer error → 401
/// - `Deny` decision → 403
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let token = match request.headers().get(&state.api_key_header).map(|v| v.to_str()) {
        Some(Ok(t)) => t.to_owned(),
        Some(Err(_)) | None => {
            debug!(header = %state.api_key_header, "request carries no usable API key");
            return reject(ServiceError::Unauthorized);
        }
    };

    // Nested routers see a stripped path; the gateway authorizes the full one.
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let resource = method_arn(&state.method_arn_prefix, request.method(), &path);

    match rejection(state.authorizer.authorize(&token, &resource).await) {
        Some(resp) => resp,
        None => next.run(request).await,
    }
}

/// Gateway response for a failed check, or `None` when the request may pass.
///
/// The shared-secret authorizer only ever allows or errors; `Deny` is mapped
/// for decisions that explicitly refuse a resource.
fn rejection(outcome: Result<AccessDecision, AuthError>) -> Option<Response> {
    match outcome {
        Ok(decision) if decision.is_allowed() => None,
        Ok(_) => Some(reject(ServiceError::Forbidden(
            "User is not authorized to access this resource".into(),
        ))),
        Err(_) => Some(reject(ServiceError::Unauthorized)),
    }
}

/// Resource identifier of one request: `<prefix>/<METHOD><path>`.
pub fn method_arn(prefix: &str, method: &Method, path: &str) -> String {
    format!("{prefix}/{method}{path}")
}

/// Gateway-style rejection: `{"message": ...}` rather than the API's `detail`.
fn reject(e: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(GatewayMessage::from(&e))).into_response()
}
