//! Translation of service errors into HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::ErrorResponse;
use common::ServiceError;
use tracing::debug;

use crate::items::StoreError;

/// Body message for every item lookup miss.
pub const ITEM_NOT_FOUND: &str = "Item not found";

/// Handler error: a [`ServiceError`] rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => Self(ServiceError::NotFound(ITEM_NOT_FOUND.into())),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ServiceError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        debug!(status = status.as_u16(), error = %self.0, "request rejected");
        (status, Json(ErrorResponse::new(self.0.detail()))).into_response()
    }
}
