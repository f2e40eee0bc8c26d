//! Axum request handlers for all service endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use common::protocol::{ErrorResponse, HealthResponse, Item, ItemPayload};
use common::ServiceError;
use openapiv3::OpenAPI;
use tracing::info;
use uuid::Uuid;

use super::error::ApiError;
use super::state::AppState;

/// `POST /items`: create an item with a generated id.
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let Json(payload) = payload?;
    let session = state.db.acquire();
    let item = session.create(payload.name, payload.description).await;
    info!(item_id = %item.id, session = %session.id(), "item created");
    Ok(Json(item))
}

/// `GET /items`: every item in insertion order.
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.db.acquire().list().await)
}

/// `GET /items/{item_id}`
pub async fn read_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_item_id(&item_id)?;
    let item = state.db.acquire().get(id).await?;
    Ok(Json(item))
}

/// `PUT /items/{item_id}`: replace name and description; the id stays.
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_item_id(&item_id)?;
    let Json(payload) = payload?;
    let session = state.db.acquire();
    let item = session.update(id, payload.name, payload.description).await?;
    info!(item_id = %id, session = %session.id(), "item updated");
    Ok(Json(item))
}

/// `DELETE /items/{item_id}`: remove and return the item.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_item_id(&item_id)?;
    let session = state.db.acquire();
    let item = session.delete(id).await?;
    info!(item_id = %id, session = %session.id(), "item deleted");
    Ok(Json(item))
}

/// `GET /health`: liveness check; not behind the API key.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        items: Some(state.db.acquire().len().await),
    })
}

/// `GET /openapi.json`
pub async fn openapi(Extension(doc): Extension<Arc<OpenAPI>>) -> Json<OpenAPI> {
    Json(doc.as_ref().clone())
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not Found")))
}

/// Method fallback for the item routes.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method Not Allowed")),
    )
}

/// A structurally invalid id is a client error, distinct from an unknown one.
fn parse_item_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|e| ServiceError::InvalidInput(format!("invalid item id: {e}")))
}
