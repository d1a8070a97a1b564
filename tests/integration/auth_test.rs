//! Integration tests for login, rehydration, and forced logout.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;

use infradesk_auth::session::store::LOGIN_FAILED_MESSAGE;
use infradesk_auth::{AuthStatus, GuardDecision, MemoryStorage, PersistedAuth};
use infradesk_core::error::ErrorKind;
use infradesk_core::traits::KeyValueStore;
use infradesk_core::types::UserId;
use infradesk_entity::{Credentials, Datacenter, Profile, Session, UserRole, UserStatus};

const STORAGE_KEY: &str = "auth-storage";

fn alice() -> Session {
    Session::from_login(
        "alice",
        helpers::TOKEN,
        Profile {
            id: UserId(1),
            first_name: "Alice".to_string(),
            last_name: "Ng".to_string(),
            email: "alice@example.com".to_string(),
            role: UserRole::Admin,
            status: UserStatus::Active,
        },
    )
    .expect("complete session")
}

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new().await;

    let session = app
        .console
        .login(&Credentials::new("alice", "correct"))
        .await
        .expect("login should succeed");

    assert_eq!(session.token, helpers::TOKEN);
    assert_eq!(session.username, "alice");
    assert_eq!(session.role, UserRole::Admin);
    assert_eq!(app.console.store.status().await, AuthStatus::Authenticated);
    assert_eq!(app.navigator.last().as_deref(), Some("/"));

    let me = app.backend.requests_to("GET", "/me/");
    assert_eq!(me.len(), 1);
    assert_eq!(me[0].bearer.as_deref(), Some(helpers::TOKEN));

    let stored = app.storage.get(STORAGE_KEY).await.unwrap().expect("record persisted");
    let record: PersistedAuth = serde_json::from_str(&stored).unwrap();
    assert_eq!(record.user, Some(session));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = helpers::TestApp::new().await;

    let err = app
        .console
        .login(&Credentials::new("alice", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, LOGIN_FAILED_MESSAGE);
    assert_eq!(app.console.store.status().await, AuthStatus::Unauthenticated);
    assert_eq!(
        app.console.store.last_error().await.as_deref(),
        Some(LOGIN_FAILED_MESSAGE)
    );
    assert!(app.console.store.current_session().await.is_none());
    assert!(!app.storage.contains(STORAGE_KEY));
    assert!(app.backend.requests_to("GET", "/me/").is_empty());
}

#[tokio::test]
async fn test_login_blank_fields_sends_nothing() {
    let app = helpers::TestApp::new().await;

    let err = app
        .console
        .login(&Credentials::new("", ""))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(app.backend.requests().is_empty());
}

#[tokio::test]
async fn test_forbidden_response_forces_logout() {
    let app = helpers::TestApp::signed_in().await;
    app.backend.revoke_token();

    let err = app
        .console
        .sync::<Datacenter>()
        .refresh()
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(app.console.store.current_session().await.is_none());
    assert!(app.console.store.token().await.is_none());
    assert!(!app.storage.contains(STORAGE_KEY));
    assert_eq!(app.navigator.last().as_deref(), Some("/signin"));
    assert!(matches!(
        app.console.auth_guard().check().await,
        GuardDecision::Redirect(route) if route == "/signin"
    ));
}

#[tokio::test]
async fn test_hydrates_persisted_session_without_network() {
    let storage = Arc::new(MemoryStorage::new());
    let record = PersistedAuth {
        user: Some(alice()),
    };
    storage
        .set(STORAGE_KEY, &serde_json::to_string(&record).unwrap())
        .await
        .unwrap();

    let app = helpers::TestApp::with_storage(storage).await;

    assert!(app.console.store.is_hydrated());
    assert_eq!(app.console.store.status().await, AuthStatus::Authenticated);
    assert_eq!(app.console.store.token().await.as_deref(), Some(helpers::TOKEN));
    assert!(app.backend.requests().is_empty());
    assert!(app.console.auth_guard().check().await.is_allowed());
}

#[tokio::test]
async fn test_corrupt_record_is_discarded() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(STORAGE_KEY, "{not json").await.unwrap();

    let app = helpers::TestApp::with_storage(storage).await;

    assert!(app.console.store.is_hydrated());
    assert_eq!(app.console.store.status().await, AuthStatus::Unauthenticated);
    assert!(!app.storage.contains(STORAGE_KEY));
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let app = helpers::TestApp::signed_in().await;

    app.console.logout().await;

    assert!(app.console.store.current_session().await.is_none());
    assert!(!app.storage.contains(STORAGE_KEY));
    assert_eq!(app.navigator.last().as_deref(), Some("/signin"));
    assert!(app.backend.requests().is_empty());
}

async fn assert_token_discarded(app: &helpers::TestApp, message: &str) {
    assert_eq!(app.console.store.status().await, AuthStatus::Unauthenticated);
    assert!(app.console.store.current_session().await.is_none());
    assert!(app.console.store.token().await.is_none());
    assert_eq!(app.console.store.last_error().await.as_deref(), Some(message));
    assert!(!app.storage.contains(STORAGE_KEY));
}

#[tokio::test]
async fn test_profile_server_error_discards_token() {
    let app = helpers::TestApp::new().await;
    app.backend.fail_profile(StatusCode::INTERNAL_SERVER_ERROR);

    let err = app
        .console
        .login(&Credentials::new("alice", "correct"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(app.backend.requests_to("POST", "/login/").len(), 1);
    assert_eq!(app.backend.requests_to("GET", "/me/").len(), 1);
    assert_token_discarded(&app, "Profile service unavailable").await;
}

#[tokio::test]
async fn test_profile_rejection_discards_token() {
    let app = helpers::TestApp::new().await;
    app.backend.fail_profile(StatusCode::UNAUTHORIZED);

    let err = app
        .console
        .login(&Credentials::new("alice", "correct"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_token_discarded(&app, LOGIN_FAILED_MESSAGE).await;
    assert_eq!(app.navigator.last().as_deref(), Some("/signin"));
}

#[tokio::test]
async fn test_second_login_while_authenticating_conflicts() {
    let app = helpers::TestApp::new().await;
    let gate = app.backend.hold_profile();

    let console = app.console.clone();
    let first = tokio::spawn(async move {
        console
            .login(&Credentials::new("alice", "correct"))
            .await
    });
    gate.reached.notified().await;
    assert_eq!(app.console.store.status().await, AuthStatus::Authenticating);

    let err = app
        .console
        .login(&Credentials::new("alice", "correct"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(app.console.store.status().await, AuthStatus::Authenticating);
    assert!(app.console.store.last_error().await.is_none());
    assert_eq!(app.backend.requests_to("POST", "/login/").len(), 1);

    gate.release.notify_one();
    let session = first.await.unwrap().expect("first login should succeed");

    assert_eq!(session.token, helpers::TOKEN);
    assert_eq!(app.console.store.status().await, AuthStatus::Authenticated);
    assert!(app.storage.contains(STORAGE_KEY));
}
