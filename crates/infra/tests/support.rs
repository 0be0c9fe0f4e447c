//! Shared fixtures for the API client integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use monta_domain::{ClientConfig, Result};
use monta_infra::{HttpSession, MontaApiClient, StaticTokenProvider};
use reqwest::{Request, Response};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "integration-token";

/// Session wrapper that counts requests before delegating to reqwest.
pub struct CountingSession {
    inner: reqwest::Client,
    sent: AtomicUsize,
}

impl CountingSession {
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::builder().no_proxy().build().expect("reqwest client"),
            sent: AtomicUsize::new(0),
        }
    }

    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpSession for CountingSession {
    async fn send(&self, request: Request) -> Result<Response> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        HttpSession::send(&self.inner, request).await
    }
}

pub fn plain_session() -> Arc<dyn HttpSession> {
    Arc::new(reqwest::Client::builder().no_proxy().build().expect("reqwest client"))
}

/// Client with a fixed bearer token pointed at the mock server.
pub fn client_with_static_token(server: &MockServer) -> MontaApiClient {
    MontaApiClient::builder()
        .config(ClientConfig::with_base_url(server.uri()))
        .session(plain_session())
        .auth(Arc::new(StaticTokenProvider::new(TEST_TOKEN)))
        .build()
        .expect("client should build")
}

pub fn charge_points_body() -> Value {
    json!({
        "data": [
            {
                "id": 101,
                "name": "Driveway",
                "serialNumber": "EH-0001",
                "type": "private",
                "state": "available",
                "visibility": "private",
                "lastMeterReadingKwh": 1834.25,
                "brandName": "Easee",
                "modelName": "Home",
                "firmwareVersion": "4.1.0",
                "cablePluggedIn": false
            },
            {
                "id": 202,
                "name": "Office",
                "serialNumber": null,
                "type": "team",
                "state": "busy-charging",
                "visibility": "public",
                "lastMeterReadingKwh": 92.0,
                "brandName": "Zaptec",
                "modelName": "Go",
                "firmwareVersion": "2.0.7",
                "cablePluggedIn": true,
                "charges": [{ "id": 9001, "state": "charging" }]
            }
        ],
        "meta": { "page": 0, "perPage": 50, "totalPageCount": 1, "totalItemCount": 2 }
    })
}

pub fn charge_body(id: i64, state: &str) -> Value {
    json!({
        "id": id,
        "state": state,
        "chargePointId": 101,
        "createdAt": "2024-05-01T08:00:00Z",
        "startedAt": "2024-05-01T08:01:00.000Z"
    })
}

pub fn token_body(access: &str, valid_for_secs: i64) -> Value {
    json!({
        "accessToken": access,
        "accessTokenExpirationDate": (Utc::now() + Duration::seconds(valid_for_secs)).to_rfc3339(),
        "refreshToken": format!("{access}-refresh"),
        "refreshTokenExpirationDate": (Utc::now() + Duration::days(30)).to_rfc3339(),
        "userId": "user-42"
    })
}

/// Mount a token endpoint that hands out `access` and expects `times` calls.
pub async fn mount_token_endpoint(server: &MockServer, access: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access, 3600)))
        .expect(times)
        .mount(server)
        .await;
}
