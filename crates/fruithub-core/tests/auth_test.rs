#![allow(clippy::unwrap_used)]
// Integration tests for the auth sub-state.

mod common;

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{setup, user_json};
use fruithub_core::{DataStore, ErrorKind, MemorySnapshotStore, StoreChange, User, UserPatch};

fn password(raw: &str) -> SecretString {
    SecretString::from(raw.to_string())
}

#[tokio::test]
async fn test_login_success_sets_session() {
    let (server, store, _snapshots) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admins/login"))
        .and(body_json(json!({ "email": "dana@fruithub.io", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "dana@fruithub.io")))
        .expect(1)
        .mount(&server)
        .await;

    let mut changes = store.subscribe();
    let user = store
        .auth()
        .login("dana@fruithub.io", &password("hunter2"))
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    let state = store.auth().state();
    assert!(state.is_authenticated);
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.user.unwrap().display_name(), "Dana");

    // pending, then success
    assert_eq!(changes.try_recv().unwrap(), StoreChange::Auth);
    assert_eq!(changes.try_recv().unwrap(), StoreChange::Auth);
    assert!(changes.try_recv().is_err());
}

#[tokio::test]
async fn test_login_rejection_records_backend_message() {
    let (server, store, _snapshots) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admins/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let err = store
        .auth()
        .login("dana@fruithub.io", &password("wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);

    let state = store.auth().state();
    assert!(!state.is_authenticated);
    assert!(!state.loading);
    let info = state.error.unwrap();
    assert_eq!(info.kind, ErrorKind::Auth);
    assert_eq!(info.message, "Invalid credentials");
}

#[tokio::test]
async fn test_login_response_without_id_is_rejected() {
    let (server, store, _snapshots) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admins/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "x@y.z" })))
        .mount(&server)
        .await;

    store
        .auth()
        .login("x@y.z", &password("pw"))
        .await
        .unwrap_err();

    assert_eq!(
        store.auth().state().error.unwrap().message,
        "Invalid login response"
    );
}

#[tokio::test]
async fn test_login_against_unreachable_backend_is_network_error() {
    let store = DataStore::new(
        common::client_for("http://127.0.0.1:1/"),
        Arc::new(MemorySnapshotStore::new()),
    );

    let err = store
        .auth()
        .login("dana@fruithub.io", &password("pw"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    let info = store.auth().state().error.unwrap();
    assert_eq!(info.kind, ErrorKind::Network);
    assert_eq!(info.message, "Login failed");
}

#[tokio::test]
async fn test_failed_login_clears_existing_session() {
    let (server, store, _snapshots) = setup().await;
    let auth = store.auth();

    Mock::given(method("POST"))
        .and(path("/admins/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad" })))
        .mount(&server)
        .await;

    let user: User = serde_json::from_value(user_json("u1", "dana@fruithub.io")).unwrap();
    auth.set_user(user);
    assert!(auth.is_authenticated());

    auth.login("dana@fruithub.io", &password("wrong"))
        .await
        .unwrap_err();

    let state = auth.state();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated);
    assert!(!state.loading);
    assert_eq!(state.error.unwrap().message, "bad");
}

#[tokio::test]
async fn test_set_user_clears_login_error() {
    let (server, store, _snapshots) = setup().await;
    let auth = store.auth();

    Mock::given(method("POST"))
        .and(path("/admins/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad" })))
        .mount(&server)
        .await;

    auth.login("dana@fruithub.io", &password("wrong"))
        .await
        .unwrap_err();
    assert!(auth.state().error.is_some());

    let user: User = serde_json::from_value(user_json("u2", "sam@fruithub.io")).unwrap();
    auth.set_user(user);

    let state = auth.state();
    assert!(state.error.is_none());
    assert!(state.is_authenticated);
    assert_eq!(state.user.unwrap().id, "u2");
}

#[tokio::test]
async fn test_profile_edits_and_logout() {
    let (_server, store, _snapshots) = setup().await;
    let auth = store.auth();

    assert!(!auth.update_user(UserPatch {
        city: Some("Lisbon".into()),
        ..UserPatch::default()
    }));
    assert!(auth.user().is_none());

    let user: User = serde_json::from_value(user_json("u1", "dana@fruithub.io")).unwrap();
    auth.set_user(user);
    assert!(auth.is_authenticated());

    assert!(auth.update_user(UserPatch {
        city: Some("Lisbon".into()),
        name: Some("Dana R.".into()),
        ..UserPatch::default()
    }));
    let user = auth.user().unwrap();
    assert_eq!(user.city.as_deref(), Some("Lisbon"));
    assert_eq!(user.display_name(), "Dana R.");
    assert_eq!(user.email, "dana@fruithub.io");

    auth.logout();
    assert_eq!(auth.state(), fruithub_core::AuthState::default());
}
