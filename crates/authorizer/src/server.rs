//! HTTP surface of the authorizer sidecar.
//!
//! A gateway posts its authorizer event to `POST /authorize` and receives
//! either the allow policy (200) or the generic 401 body.

use std::sync::Arc;

use authorizer::Authorizer;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use common::protocol::{AuthorizerEvent, GatewayMessage, HealthResponse};
use common::ServiceError;
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Clone)]
pub struct SidecarState {
    pub authorizer: Arc<Authorizer>,
    pub token_header: Arc<String>,
}

/// Build the sidecar [`Router`].
pub fn build(state: SidecarState) -> Router {
    Router::new()
        .route("/authorize", post(authorize))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `POST /authorize`: evaluate one authorizer event.
async fn authorize(
    State(state): State<SidecarState>,
    event: Result<Json<AuthorizerEvent>, JsonRejection>,
) -> Response {
    let Json(event) = match event {
        Ok(e) => e,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "malformed authorizer event");
            return reject(ServiceError::BadRequest(rejection.body_text()));
        }
    };

    match state.authorizer.handle_event(&event, &state.token_header).await {
        Ok(policy) => (StatusCode::OK, Json(policy)).into_response(),
        Err(_) => reject(ServiceError::Unauthorized),
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        items: None,
    })
}

async fn not_found() -> Response {
    reject(ServiceError::NotFound("Not Found".into()))
}

fn reject(e: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(GatewayMessage::from(&e))).into_response()
}
