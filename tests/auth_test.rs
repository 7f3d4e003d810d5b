mod common;

use axum::http::{Method, StatusCode};
use common::{MockBackend, MockPrompter};
use recruitment_admin::{client::auth::TokenStore, error::Error, views::notifier::ToastLevel};
use serde_json::{json, Value as JsonValue};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn login_stores_token_and_greets_user() {
    let backend = MockBackend::start().await;
    backend.ok(Method::POST, "auth/login", json!({"token": "fresh"}));
    backend.ok(
        Method::GET,
        "auth/me",
        json!({"_id": "u1", "name": "Aziz", "email": "aziz@corp.io", "isActive": true}),
    );
    let (app, notifier, tokens) = backend.app_with(None, MockPrompter::new());

    let me = assert_ok!(app.access_control().login(" aziz@corp.io ", "secret").await);

    assert_eq!(me.name, "Aziz");
    assert_eq!(tokens.token().as_deref(), Some("fresh"));
    let login = &backend.requests_to(Method::POST, "auth/login")[0];
    assert_eq!(login.json()["email"], "aziz@corp.io");
    let me_call = &backend.requests_to(Method::GET, "auth/me")[0];
    assert_eq!(me_call.authorization.as_deref(), Some("Bearer fresh"));
    assert_eq!(
        notifier.last(),
        Some((ToastLevel::Success, "Logged in as Aziz".to_string()))
    );
}

#[tokio::test]
async fn malformed_email_is_rejected_locally() {
    let backend = MockBackend::start().await;
    let (app, notifier, _) = backend.app_with(None, MockPrompter::new());

    assert!(app.access_control().login("nope", "secret").await.is_err());
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Please enter a valid email address".to_string()]
    );
}

#[tokio::test]
async fn rejected_login_shows_backend_message() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::POST,
        "auth/login",
        StatusCode::UNAUTHORIZED,
        json!({"success": false, "message": "Invalid email or password"}),
    );
    let (app, notifier, tokens) = backend.app_with(None, MockPrompter::new());

    let err = assert_err!(app.access_control().login("aziz@corp.io", "wrong").await);

    assert!(matches!(err, Error::SessionExpired(Some(ref m)) if m == "Invalid email or password"));
    assert_eq!(tokens.token(), None);
    assert!(backend.requests_to(Method::GET, "auth/me").is_empty());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Invalid email or password".to_string()]
    );
}

#[tokio::test]
async fn unauthorized_outside_auth_keeps_session() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "ai-matching/results",
        StatusCode::UNAUTHORIZED,
        json!({"message": "AI service token rejected"}),
    );
    let (app, _, tokens) = backend.app_with(Some("keep-me"), MockPrompter::new());

    let err = assert_err!(app.client.get::<JsonValue>("ai-matching/results").await);

    assert!(matches!(err, Error::Unauthorized(ref m) if m == "AI service token rejected"));
    assert_eq!(tokens.token().as_deref(), Some("keep-me"));
}

#[tokio::test]
async fn unauthorized_on_auth_endpoint_clears_session() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "auth/me",
        StatusCode::UNAUTHORIZED,
        json!({"message": "jwt expired"}),
    );
    let (app, _, tokens) = backend.app_with(Some("stale"), MockPrompter::new());

    let err = assert_err!(app.access.me().await);

    assert!(matches!(err, Error::SessionExpired(_)));
    assert_eq!(tokens.token(), None);
}

#[tokio::test]
async fn unauthorized_without_token_is_session_expired() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "positions",
        StatusCode::UNAUTHORIZED,
        json!({"message": "No token provided"}),
    );
    let (app, _, _) = backend.app_with(None, MockPrompter::new());

    let err = assert_err!(app.positions.list(None).await);

    assert!(matches!(err, Error::SessionExpired(_)));
    assert!(backend.requests()[0].authorization.is_none());
}

#[tokio::test]
async fn server_error_without_message_uses_generic_text() {
    let backend = MockBackend::start().await;
    backend.on(Method::GET, "positions", StatusCode::INTERNAL_SERVER_ERROR, JsonValue::Null);
    let (app, notifier) = backend.app();

    let mut manager = app.position_manager();
    assert!(manager.refresh().await.is_err());
    assert_eq!(
        notifier.messages(ToastLevel::Error),
        vec!["Something went wrong. Please try again.".to_string()]
    );
}
