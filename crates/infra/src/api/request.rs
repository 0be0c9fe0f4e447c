//! Request construction and response classification shared by the auth
//! service and the API client.

use monta_domain::{MontaError, Result};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Body, Method, Request, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::InfraError;

/// Build a JSON request
///
/// `query` pairs are appended in order. A bearer header is attached when
/// `token` is given.
pub(crate) fn json_request<B: Serialize + ?Sized>(
    method: Method,
    url: &str,
    query: &[(&str, String)],
    token: Option<&str>,
    body: Option<&B>,
) -> Result<Request> {
    let mut url = Url::parse(url)
        .map_err(|e| MontaError::Config(format!("Invalid request URL '{}': {}", url, e)))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    let mut request = Request::new(method, url);
    let headers = request.headers_mut();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| MontaError::Auth("Access token contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, value);
    }

    if let Some(body) = body {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| MontaError::InvalidInput(format!("Failed to serialize body: {}", e)))?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(Body::from(bytes));
    }

    Ok(request)
}

/// Check the status, then decode the body as JSON
///
/// A non-success status is classified from the status code alone; the body
/// is only used to enrich the message, so an error page that is not JSON
/// still yields an API-level error rather than a decode error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().clone();

    let bytes = response.bytes().await.map_err(|e| MontaError::from(InfraError::from(e)))?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&bytes);
        warn!(%url, %status, "API returned non-success status");
        return Err(map_status_error(status, url.path(), &body));
    }

    serde_json::from_slice(&bytes).map_err(|e| MontaError::from(InfraError::from(e)))
}

/// Error body shape used by the API (`{"message": ..., "errorCode": ...}`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

fn describe_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(ErrorBody { message: Some(message), error_code: Some(code) }) => {
            Some(format!("{} ({})", message, code))
        }
        Ok(ErrorBody { message: Some(message), error_code: None }) => Some(message),
        _ => Some(trimmed.chars().take(512).collect()),
    }
}

pub(crate) fn map_status_error(status: StatusCode, path: &str, body: &str) -> MontaError {
    let message = match describe_body(body) {
        Some(detail) => format!("{} returned status {}: {}", path, status, detail),
        None => format!("{} returned status {}", path, status),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MontaError::Auth(message),
        StatusCode::NOT_FOUND => MontaError::NotFound(message),
        _ => MontaError::Api { status: status.as_u16(), message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_authorized_get_with_query() {
        let request = json_request::<()>(
            Method::GET,
            "https://public-api.monta.com/api/v1/charges",
            &[("chargePointId", "17".to_string()), ("page", "0".to_string())],
            Some("tok"),
            None,
        )
        .unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://public-api.monta.com/api/v1/charges?chargePointId=17&page=0"
        );
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer tok");
        assert!(request.body().is_none());
        assert!(request.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn builds_json_post_body() {
        let body = serde_json::json!({ "chargePointId": 17 });
        let request =
            json_request(Method::POST, "http://localhost/charges", &[], None, Some(&body)).unwrap();

        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert!(request.headers().get(AUTHORIZATION).is_none());
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(bytes, br#"{"chargePointId":17}"#);
    }

    #[test]
    fn rejects_unparseable_url() {
        let result = json_request::<()>(Method::GET, "not a url", &[], None, None);
        assert!(matches!(result, Err(MontaError::Config(_))));
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            map_status_error(StatusCode::UNAUTHORIZED, "/x", ""),
            MontaError::Auth(_)
        ));
        assert!(matches!(map_status_error(StatusCode::FORBIDDEN, "/x", ""), MontaError::Auth(_)));
        assert!(matches!(
            map_status_error(StatusCode::NOT_FOUND, "/x", ""),
            MontaError::NotFound(_)
        ));
        assert!(matches!(
            map_status_error(StatusCode::TOO_MANY_REQUESTS, "/x", ""),
            MontaError::Api { status: 429, .. }
        ));
        assert!(matches!(
            map_status_error(StatusCode::BAD_GATEWAY, "/x", "<html>oops</html>"),
            MontaError::Api { status: 502, .. }
        ));
    }

    #[test]
    fn status_message_uses_vendor_error_body() {
        let err = map_status_error(
            StatusCode::BAD_REQUEST,
            "/charges",
            r#"{"message":"Charge point is offline","errorCode":"CHARGE_POINT_OFFLINE"}"#,
        );
        assert_eq!(
            err.to_string(),
            "API error (status 400): /charges returned status 400 Bad Request: \
             Charge point is offline (CHARGE_POINT_OFFLINE)"
        );
    }
}
