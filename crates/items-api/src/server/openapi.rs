//! OpenAPI document served at `/openapi.json`.

use openapiv3::OpenAPI;
use serde_json::{json, Value};

/// Name of the security scheme guarding every item operation.
pub const SECURITY_SCHEME: &str = "Authorization";

/// Stage prefixes the gateway deploys the API under.
const SERVERS: [&str; 3] = ["/dev", "/stage", "/prod"];

/// Build the API description for routes under `api_prefix`, guarded by an
/// API key in `api_key_header`.
///
/// # Errors
///
/// Returns an error if the assembled document is not valid OpenAPI 3.
pub fn document(api_prefix: &str, api_key_header: &str) -> Result<OpenAPI, serde_json::Error> {
    let item_ref = json!({"$ref": "#/components/schemas/Item"});
    let id_param = json!({
        "name": "item_id",
        "in": "path",
        "required": true,
        "schema": {"type": "string", "format": "uuid"}
    });
    let payload_body = json!({
        "required": true,
        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ItemPayload"}}}
    });

    let doc = json!({
        "openapi": "3.0.2",
        "info": {"title": "Items API", "version": "0.0.1"},
        "servers": SERVERS.iter().map(|url| json!({"url": url})).collect::<Vec<_>>(),
        "security": [{SECURITY_SCHEME: []}],
        "paths": {
            format!("{api_prefix}/items"): {
                "get": operation("read_items", "List items", None, ok(json!({"type": "array", "items": item_ref.clone()}))),
                "post": operation("create_item", "Create item", Some(&payload_body), ok(item_ref.clone())),
            },
            format!("{api_prefix}/items/{{item_id}}"): {
                "get": operation("read_item", "Read item", None, ok_or_missing(&item_ref)),
                "put": operation("update_item", "Update item", Some(&payload_body), ok_or_missing(&item_ref)),
                "delete": operation("delete_item", "Delete item", None, ok_or_missing(&item_ref)),
                "parameters": [id_param],
            },
        },
        "components": {
            "schemas": {
                "Item": {
                    "type": "object",
                    "required": ["id", "name", "description"],
                    "properties": {
                        "id": {"type": "string", "format": "uuid"},
                        "name": {"type": "string"},
                        "description": {"type": "string"},
                    }
                },
                "ItemPayload": {
                    "type": "object",
                    "required": ["name", "description"],
                    "properties": {
                        "name": {"type": "string"},
                        "description": {"type": "string"},
                    }
                },
                "ErrorResponse": {
                    "type": "object",
                    "required": ["detail"],
                    "properties": {"detail": {"type": "string"}}
                },
            },
            "securitySchemes": {
                SECURITY_SCHEME: {"type": "apiKey", "name": api_key_header, "in": "header"}
            }
        }
    });

    serde_json::from_value(doc)
}

fn operation(
    id: &str,
    summary: &str,
    body: Option<&Value>,
    responses: Value,
) -> Value {
    let mut op = json!({
        "operationId": id,
        "summary": summary,
        "tags": ["items"],
        "responses": responses,
    });
    if let Some(body) = body {
        op["requestBody"] = body.clone();
    }
    op
}

fn ok(schema: Value) -> Value {
    json!({
        "200": {
            "description": "Successful Response",
            "content": {"application/json": {"schema": schema}}
        },
        "422": error_response("Validation Error"),
    })
}

fn ok_or_missing(schema: &Value) -> Value {
    let mut responses = ok(schema.clone());
    responses["404"] = error_response("Item not found");
    responses
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapiv3::{APIKeyLocation, ReferenceOr, SecurityScheme};

    #[test]
    fn document_is_valid_openapi() {
        let doc = document("/v1", "x-api-key").unwrap();
        assert_eq!(doc.info.title, "Items API");
        assert_eq!(doc.info.version, "0.0.1");
        assert!(doc.paths.paths.contains_key("/v1/items"));
        assert!(doc.paths.paths.contains_key("/v1/items/{item_id}"));
    }

    #[test]
    fn servers_are_stages() {
        let doc = document("/v1", "x-api-key").unwrap();
        let urls: Vec<_> = doc.servers.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, ["/dev", "/stage", "/prod"]);
    }

    #[test]
    fn security_scheme_uses_configured_header() {
        let doc = document("/api", "x-custom-key").unwrap();
        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        match schemes.get(SECURITY_SCHEME) {
            Some(ReferenceOr::Item(SecurityScheme::APIKey { location, name, .. })) => {
                assert!(matches!(location, APIKeyLocation::Header));
                assert_eq!(name, "x-custom-key");
            }
            other => panic!("unexpected security scheme: {other:?}"),
        }
        assert!(doc.paths.paths.contains_key("/api/items"));
    }
}
