#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fruithub_api::{ApiClient, Error, TransportConfig};

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: String,
    title: String,
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Collection tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_collection() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "p1", "title": "Organic Milk" },
            { "id": "p2", "title": "Fresh Bread" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let items: Vec<Item> = client.fetch("products").await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "p1");
    assert_eq!(items[1].title, "Fresh Bread");
}

#[tokio::test]
async fn test_create_posts_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/categories"))
        .and(body_json(json!({ "title": "Bananas" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "c7", "title": "Bananas" })),
        )
        .mount(&server)
        .await;

    let created: Item = client
        .create("categories", &json!({ "title": "Bananas" }))
        .await
        .unwrap();

    assert_eq!(
        created,
        Item {
            id: "c7".into(),
            title: "Bananas".into()
        }
    );
}

#[tokio::test]
async fn test_update_targets_item_path() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/products/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "p1", "title": "Milk 2L" })),
        )
        .mount(&server)
        .await;

    let updated: Item = client
        .update("products", "p1", &json!({ "title": "Milk 2L" }))
        .await
        .unwrap();

    assert_eq!(updated.title, "Milk 2L");
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/admins/a1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete("admins", "a1").await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result: Result<Item, _> = client.update("products", "missing", &json!({})).await;

    match result {
        Err(Error::NotFound { ref path }) => assert_eq!(path, "/products/missing"),
        other => panic!("expected NotFound error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_rejection_carries_backend_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "price must be positive" })),
        )
        .mount(&server)
        .await;

    let result: Result<Item, _> = client.create("products", &json!({ "price": -1 })).await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "price must be positive");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result: Result<Vec<Item>, _> = client.fetch("products").await;

    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body == "not json"),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let transport = TransportConfig::default().with_timeout(Duration::from_millis(100));
    let client = ApiClient::new(Url::parse(&server.uri()).unwrap(), &transport).unwrap();

    let result: Result<serde_json::Value, _> = client.fetch("stats").await;

    assert!(
        matches!(result, Err(Error::Timeout { .. })),
        "expected Timeout error, got: {result:?}"
    );
    assert!(result.unwrap_err().is_transient());
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admins/login"))
        .and(body_json(json!({ "email": "ops@fruithub.io", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "title": "Ops"
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    let user: Item = client.login("ops@fruithub.io", &secret).await.unwrap();
    assert_eq!(user.id, "u1");
}

#[tokio::test]
async fn test_login_rejected_surfaces_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admins/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result: Result<Item, _> = client.login("ops@fruithub.io", &secret).await;

    match result {
        Err(Error::Authentication { ref message }) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_without_message_falls_back() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admins/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "pw".to_string().into();
    let result: Result<Item, _> = client.login("ops@fruithub.io", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message == "Login failed"),
        "expected fallback message, got: {result:?}"
    );
}

#[tokio::test]
async fn test_login_response_without_id_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admins/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "pw".to_string().into();
    let result: Result<Item, _> = client.login("ops@fruithub.io", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message == "Invalid login response"),
        "expected invalid response error, got: {result:?}"
    );
}
