//! Integration tests for the API client using a wiremock mock server.

use std::sync::Arc;

use api::{ApiClient, ApiError, ItemPayload, MemoryStore, TokenStore};

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_token(uri: &str, token: Option<&str>) -> (ApiClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    if let Some(token) = token {
        store.set(token);
    }
    let client = ApiClient::new(uri, store.clone());
    (client, store)
}

fn user_body() -> serde_json::Value {
    json!({
        "id": 1,
        "email": "ivan@example.com",
        "username": "ivan",
        "full_name": "Иван Петров",
        "telegram": null,
        "phone": null,
        "is_profile_public": true,
        "show_email_in_profile": true,
        "is_active": true,
        "created_at": "2024-03-01T12:00:00Z"
    })
}

#[tokio::test]
async fn test_bearer_header_attached_when_token_stored() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer sekret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server.uri(), Some("sekret"));
    let user = client.current_user().await.unwrap();
    assert_eq!(user.username, "ivan");
}

#[tokio::test]
async fn test_unauthorized_clears_token_and_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Токен истек"})),
        )
        .mount(&server)
        .await;

    let (client, store) = client_with_token(&server.uri(), Some("stale"));
    let err = client.current_user().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Токен истек");
    assert_eq!(store.get(), None, "401 must drop the stored credential");
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_status_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/portfolio"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server.uri(), Some("tok"));
    let err = client.list_portfolio().await.unwrap_err();

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("500"), "fallback must include the status: {message}");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_without_access_token_persists_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login-json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "bearer"})))
        .mount(&server)
        .await;

    let (client, store) = client_with_token(&server.uri(), None);
    let err = client.login("ivan", "pass").await.unwrap_err();

    assert!(matches!(err, ApiError::NoToken));
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_login_persists_token_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login-json"))
        .and(body_string_contains("\"username\":\"ivan\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    let (client, store) = client_with_token(&server.uri(), None);
    client.login("ivan", "pass").await.unwrap();

    assert_eq!(store.get(), Some("fresh-token".to_string()));
    assert!(client.has_token());
}

#[tokio::test]
async fn test_failed_login_does_not_redirect_decision_into_client() {
    // A 401 on login must come back as a typed error so the login page can
    // show it inline; the client itself performs no navigation.
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login-json"))
        .respond_with(ResponseTemplate::new(401).set_body_string(""))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server.uri(), None);
    let err = client.login("ivan", "wrong").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Неверное имя пользователя или пароль");
}

#[tokio::test]
async fn test_update_profile_sends_explicit_nulls() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/me"))
        .and(body_string_contains("\"telegram\":null"))
        .and(body_string_contains("\"phone\":null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server.uri(), Some("tok"));
    let update = api::ProfileUpdate {
        email: "ivan@example.com".to_string(),
        username: "ivan".to_string(),
        full_name: Some("Иван Петров".to_string()),
        telegram: None,
        phone: None,
        is_profile_public: true,
        show_email_in_profile: true,
    };
    client.update_profile(&update).await.unwrap();
}

#[tokio::test]
async fn test_change_password_sends_only_password_field() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/me"))
        .and(body_string_contains("\"password\":\"secret-6\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server.uri(), Some("tok"));
    client.change_password("secret-6").await.unwrap();
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/portfolio/42"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server.uri(), Some("tok"));
    client.delete_item(42).await.unwrap();
}

#[tokio::test]
async fn test_create_item_roundtrip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portfolio"))
        .and(body_string_contains("\"title\":\"Сайт-визитка\""))
        .and(body_string_contains("\"description\":null"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "title": "Сайт-визитка",
            "description": null,
            "image_url": "/uploads/5.png",
            "project_url": null,
            "technologies": null,
            "is_visible": true
        })))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server.uri(), Some("tok"));
    let payload = ItemPayload {
        title: "Сайт-визитка".to_string(),
        description: None,
        image_url: Some("/uploads/5.png".to_string()),
        project_url: None,
        technologies: None,
        is_visible: true,
    };
    let item = client.create_item(&payload).await.unwrap();
    assert_eq!(item.id, 5);
    assert_eq!(item.image_url.as_deref(), Some("/uploads/5.png"));
}

#[tokio::test]
async fn test_upload_image_returns_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/portfolio/upload-image"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"image_url": "/uploads/a.png"})),
        )
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server.uri(), Some("tok"));
    let url = client
        .upload_image("a.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47])
        .await
        .unwrap();
    assert_eq!(url, "/uploads/a.png");
}

#[tokio::test]
async fn test_unreachable_backend_maps_to_network_error() {
    // Port 9 is the discard service; nothing is listening there.
    let (client, _) = client_with_token("http://127.0.0.1:9/api/v1", Some("tok"));
    let err = client.list_portfolio().await.unwrap_err();
    assert!(matches!(err, ApiError::Network));
}
