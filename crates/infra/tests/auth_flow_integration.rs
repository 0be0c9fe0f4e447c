//! End-to-end auth flow: client credentials exchanged once, the bearer token
//! reused across endpoint calls, and rejected credentials surfaced as auth
//! errors before any endpoint is touched.

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use std::sync::Arc;

use monta_domain::{ClientConfig, Credentials, ErrorCategory, MontaError};
use monta_infra::{AccessTokenProvider, HttpSession, MontaApiClient, MontaAuthService};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{charge_points_body, mount_token_endpoint, plain_session, token_body, CountingSession};

fn credential_client(server: &MockServer, session: Arc<dyn HttpSession>) -> MontaApiClient {
    MontaApiClient::builder()
        .config(ClientConfig::with_base_url(server.uri()))
        .session(session)
        .credentials("client-id", "client-secret")
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn token_is_fetched_once_and_reused() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "issued-token", 1).await;
    Mock::given(method("GET"))
        .and(path("/charge-points"))
        .and(header("Authorization", "Bearer issued-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(charge_points_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wallets/personal"))
        .and(header("Authorization", "Bearer issued-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(CountingSession::new());
    let client = credential_client(&server, session.clone());

    assert_eq!(client.async_get_charge_points().await.unwrap().len(), 2);
    assert_eq!(client.async_get_charge_points().await.unwrap().len(), 2);
    assert_eq!(client.async_get_personal_wallet().await.unwrap().id, 5);

    // one token exchange plus three endpoint calls
    assert_eq!(session.sent(), 4);
}

#[tokio::test]
async fn new_sends_credentials_as_camel_case_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(body_json(json!({ "clientId": "my-id", "clientSecret": "my-secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("t", 3600)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/charge-points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = MontaApiClient::builder()
        .config(ClientConfig::with_base_url(server.uri()))
        .credentials("my-id", "my-secret")
        .session(plain_session())
        .build()
        .unwrap();

    assert!(client.async_get_charge_points().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejected_credentials_never_reach_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad client secret" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/charge-points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(charge_points_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = credential_client(&server, plain_session());
    let err = client.async_get_charge_points().await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Authentication);
    assert!(err.to_string().contains("Bad client secret"));
}

#[tokio::test]
async fn expiring_token_is_refreshed_between_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "short-refresh" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("long", 3600)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wallets/personal"))
        .and(header("Authorization", "Bearer long"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 9 })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::with_base_url(server.uri());
    let short_lived = serde_json::from_value(token_body("short", 30)).unwrap();
    let auth = MontaAuthService::new(
        Credentials::new("client-id", "client-secret"),
        plain_session(),
        config.clone(),
    )
    .unwrap()
    .with_token(short_lived);
    let auth = Arc::new(auth);

    let client = MontaApiClient::builder()
        .config(config)
        .session(plain_session())
        .auth(auth.clone())
        .build()
        .unwrap();

    assert_eq!(client.async_get_personal_wallet().await.unwrap().id, 9);
    assert_eq!(auth.current_token().await.unwrap().access_token, "long");
    assert_eq!(auth.current_token().await.unwrap().user_id.as_deref(), Some("user-42"));
}

#[tokio::test]
async fn custom_threshold_keeps_short_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let config = ClientConfig {
        token_refresh_threshold_secs: 10,
        ..ClientConfig::with_base_url(server.uri())
    };
    let token = serde_json::from_value(token_body("still-good", 120)).unwrap();
    let auth = MontaAuthService::new(
        Credentials::new("client-id", "client-secret"),
        plain_session(),
        config,
    )
    .unwrap()
    .with_token(token);

    assert_eq!(auth.access_token().await.unwrap(), "still-good");
}

#[tokio::test]
async fn malformed_token_response_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let client = credential_client(&server, plain_session());
    let err = client.async_get_personal_wallet().await.unwrap_err();

    assert!(matches!(err, MontaError::Auth(_)), "got {:?}", err);
}
