//! Axum router construction.

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, MethodRouter},
    Extension, Router,
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, openapi, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// Item routes live under `api_prefix` and sit behind the API key gate;
/// `/health` and `/openapi.json` do not.
///
/// # Errors
///
/// Returns an error if the OpenAPI document cannot be assembled.
pub fn build(state: AppState, api_prefix: &str) -> Result<Router, serde_json::Error> {
    let doc = openapi::document(api_prefix, state.api_key_header.as_str())?;

    let items = Router::new()
        .route("/items", collection())
        .route("/items/", collection())
        .route(
            "/items/:item_id",
            get(handlers::read_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item)
                .fallback(handlers::method_not_allowed),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_api_key));

    Ok(Router::new()
        .nest(api_prefix, items)
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(handlers::openapi))
        .fallback(handlers::not_found)
        .layer(Extension(Arc::new(doc)))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state))
}

/// `/items` and `/items/` serve the same collection.
fn collection() -> MethodRouter<AppState> {
    get(handlers::list_items)
        .post(handlers::create_item)
        .fallback(handlers::method_not_allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use authorizer::Authorizer;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::secrets::StaticSecrets;
    use tower::ServiceExt;

    use crate::db::Database;

    fn app() -> Router {
        let secrets = StaticSecrets::new().with("api-key", "token");
        let auth = Authorizer::new(Arc::new(secrets), "api-key");
        build(AppState::new(Database::in_memory(), auth), "/v1").unwrap()
    }

    async fn status_of(req: Request<Body>) -> StatusCode {
        app().oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(req).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_route_is_public() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(req).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_route_is_public() {
        let req = Request::builder()
            .uri("/openapi.json")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(req).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn items_require_api_key() {
        let req = Request::builder()
            .uri("/v1/items")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(req).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn items_reachable_with_api_key() {
        let req = Request::builder()
            .uri("/v1/items")
            .header("x-api-key", "token")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(req).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn trailing_slash_list_is_routed() {
        let req = Request::builder()
            .uri("/v1/items/")
            .header("x-api-key", "token")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(req).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn unsupported_method_renders_detail() {
        let req = Request::builder()
            .method("PATCH")
            .uri("/v1/items")
            .header("x-api-key", "token")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], br#"{"detail":"Method Not Allowed"}"#);
    }

    #[tokio::test]
    async fn trailing_slash_create_is_routed() {
        let req = Request::builder()
            .method("POST")
            .uri("/v1/items/")
            .header("x-api-key", "token")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"a","description":"b"}"#))
            .unwrap();
        assert_eq!(status_of(req).await, StatusCode::OK);
    }
}
