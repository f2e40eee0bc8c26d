//! End-to-end tests over the full router: gateway gate, handlers, store.

use std::sync::Arc;

use async_trait::async_trait;
use authorizer::Authorizer;
use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use common::protocol::Item;
use common::secrets::StaticSecrets;
use common::{SecretError, SecretStore};
use serde_json::{json, Value};
use uuid::Uuid;

use items_api::db::Database;
use items_api::server::{router, state::AppState};

const TOKEN: &str = "token";

fn api_key() -> HeaderName {
    HeaderName::from_static("x-api-key")
}

fn server_with(secrets: Arc<dyn SecretStore>) -> TestServer {
    let auth = Authorizer::new(secrets, "items-api-key");
    let state = AppState::new(Database::in_memory(), auth);
    TestServer::new(router::build(state, "/v1").unwrap()).unwrap()
}

fn server() -> TestServer {
    server_with(Arc::new(StaticSecrets::new().with("items-api-key", TOKEN)))
}

fn key() -> HeaderValue {
    HeaderValue::from_static(TOKEN)
}

fn detail_of(resp: &TestResponse) -> String {
    resp.json::<Value>()["detail"]
        .as_str()
        .unwrap_or_default()
        .to_owned()
}

async fn create(server: &TestServer, name: &str, description: &str) -> Item {
    let resp = server
        .post("/v1/items")
        .add_header(api_key(), key())
        .json(&json!({"name": name, "description": description}))
        .await;
    resp.assert_status_ok();
    resp.json::<Item>()
}

struct Unreachable;

#[async_trait]
impl SecretStore for Unreachable {
    async fn fetch_secret(&self, name: &str) -> Result<String, SecretError> {
        Err(SecretError::Fetch {
            name: name.to_owned(),
            message: "connection refused".into(),
        })
    }
}

#[tokio::test]
async fn item_lifecycle() {
    let server = server();

    let created = create(&server, "NewItem", "Sample").await;
    assert_eq!(created.name, "NewItem");
    assert_eq!(created.description, "Sample");
    let url = format!("/v1/items/{}", created.id);

    let read = server.get(&url).add_header(api_key(), key()).await;
    read.assert_status_ok();
    assert_eq!(read.json::<Item>(), created);

    let updated = server
        .put(&url)
        .add_header(api_key(), key())
        .json(&json!({"name": "UpdatedItem", "description": "UpdatedDesc"}))
        .await;
    updated.assert_status_ok();
    let updated = updated.json::<Item>();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "UpdatedItem");
    assert_eq!(updated.description, "UpdatedDesc");

    let deleted = server.delete(&url).add_header(api_key(), key()).await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Item>(), updated);

    let gone = server.get(&url).add_header(api_key(), key()).await;
    gone.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(gone.json::<Value>(), json!({"detail": "Item not found"}));
}

#[tokio::test]
async fn list_is_ordered_and_stable() {
    let server = server();
    let empty = server.get("/v1/items").add_header(api_key(), key()).await;
    empty.assert_status_ok();
    assert_eq!(empty.json::<Vec<Item>>(), Vec::<Item>::new());

    let a = create(&server, "a", "1").await;
    let b = create(&server, "b", "2").await;
    let c = create(&server, "c", "3").await;

    let first = server.get("/v1/items").add_header(api_key(), key()).await.json::<Vec<Item>>();
    let second = server.get("/v1/items").add_header(api_key(), key()).await.json::<Vec<Item>>();
    assert_eq!(first, vec![a, b, c]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn id_in_body_is_ignored() {
    let server = server();
    let created = create(&server, "n", "d").await;
    let url = format!("/v1/items/{}", created.id);

    let resp = server
        .put(&url)
        .add_header(api_key(), key())
        .json(&json!({"id": Uuid::new_v4(), "name": "n2", "description": "d2"}))
        .await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Item>().id, created.id);
}

#[tokio::test]
async fn unknown_id_is_404_and_changes_nothing() {
    let server = server();
    let kept = create(&server, "keep", "me").await;
    let url = format!("/v1/items/{}", Uuid::new_v4());

    server.get(&url).add_header(api_key(), key()).await.assert_status_not_found();
    server
        .put(&url)
        .add_header(api_key(), key())
        .json(&json!({"name": "x", "description": "y"}))
        .await
        .assert_status_not_found();
    server.delete(&url).add_header(api_key(), key()).await.assert_status_not_found();

    let listed = server.get("/v1/items").add_header(api_key(), key()).await.json::<Vec<Item>>();
    assert_eq!(listed, vec![kept]);
}

#[tokio::test]
async fn malformed_id_is_client_error_not_404() {
    let server = server();
    let resp = server.get("/v1/items/not-a-uuid").add_header(api_key(), key()).await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let detail = resp.json::<Value>()["detail"].as_str().unwrap_or_default().to_owned();
    assert!(detail.starts_with("invalid item id"), "detail was {detail:?}");
}

#[tokio::test]
async fn incomplete_body_is_rejected() {
    let server = server();
    let resp = server
        .post("/v1/items")
        .add_header(api_key(), key())
        .json(&json!({"name": "only-name"}))
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.json::<Value>()["detail"].is_string());
}

#[tokio::test]
async fn non_json_content_type_is_rejected() {
    let server = server();
    let resp = server
        .post("/v1/items")
        .add_header(api_key(), key())
        .text(r#"{"name": "n", "description": "d"}"#)
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail_of(&resp).contains("Content-Type"), "detail was {:?}", detail_of(&resp));
}

#[tokio::test]
async fn broken_json_is_rejected() {
    let server = server();
    let resp = server
        .post("/v1/items")
        .add_header(api_key(), key())
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{bad"))
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail_of(&resp).starts_with("Failed to parse the request body as JSON"));

    let listed = server.get("/v1/items").add_header(api_key(), key()).await.json::<Vec<Item>>();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn malformed_id_on_update_and_delete_is_client_error() {
    let server = server();
    let kept = create(&server, "keep", "me").await;

    let put = server
        .put("/v1/items/nope")
        .add_header(api_key(), key())
        .json(&json!({"name": "x", "description": "y"}))
        .await;
    put.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail_of(&put).starts_with("invalid item id"));

    let delete = server.delete("/v1/items/nope").add_header(api_key(), key()).await;
    delete.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail_of(&delete).starts_with("invalid item id"));

    let listed = server.get("/v1/items").add_header(api_key(), key()).await.json::<Vec<Item>>();
    assert_eq!(listed, vec![kept]);
}

#[tokio::test]
async fn trailing_slash_list_matches_list() {
    let server = server();
    let a = create(&server, "a", "1").await;
    let resp = server.get("/v1/items/").add_header(api_key(), key()).await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Vec<Item>>(), vec![a]);
}

#[tokio::test]
async fn missing_key_is_401() {
    let server = server();
    let resp = server.get("/v1/items").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>(), json!({"message": "Unauthorized"}));
}

#[tokio::test]
async fn wrong_key_is_401() {
    let server = server();
    let resp = server
        .get("/v1/items")
        .add_header(api_key(), HeaderValue::from_static("wrong"))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>(), json!({"message": "Unauthorized"}));
}

#[tokio::test]
async fn secret_store_outage_looks_like_wrong_key() {
    let down = server_with(Arc::new(Unreachable));
    let outage = down.get("/v1/items").add_header(api_key(), key()).await;

    let mismatch = server()
        .get("/v1/items")
        .add_header(api_key(), HeaderValue::from_static("wrong"))
        .await;

    assert_eq!(outage.status_code(), mismatch.status_code());
    assert_eq!(outage.json::<Value>(), mismatch.json::<Value>());
}

#[tokio::test]
async fn rejected_request_does_not_reach_store() {
    let server = server();
    server
        .post("/v1/items")
        .add_header(api_key(), HeaderValue::from_static("wrong"))
        .json(&json!({"name": "n", "description": "d"}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>(), json!({"status": "ok", "items": 0}));
}

#[tokio::test]
async fn openapi_declares_api_key_scheme() {
    let server = server();
    let resp = server.get("/openapi.json").await;
    resp.assert_status_ok();
    let doc = resp.json::<Value>();
    assert_eq!(doc["info"]["title"], "Items API");
    assert_eq!(
        doc["components"]["securitySchemes"]["Authorization"],
        json!({"type": "apiKey", "name": "x-api-key", "in": "header"})
    );
}
