//! JSON transport to the GRC REST API.
//!
//! [`Transport`] is the seam between the stores and the network.
//! [`HttpTransport`] implements it with [`reqwest`]; tests substitute an
//! in-memory implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// JSON request/response operations against API paths such as `/audits`.
///
/// Implementations return the response payload with any `{ "data": ... }`
/// envelope already removed.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, ClientError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError>;

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError>;

    async fn delete(&self, path: &str) -> Result<(), ClientError>;
}

/// HTTP client for a single GRC API root.
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

impl HttpTransport {
    /// Build a transport with the configured timeout and bearer token.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a transport reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{path}", self.api_url));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn parse_response(response: Response) -> Result<Value, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        decode_body(status, body)
    }
}

/// Check the status, then parse the body as JSON and strip the envelope.
/// An empty body yields `Value::Null`.
fn decode_body(status: StatusCode, body: String) -> Result<Value, ClientError> {
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            body,
        });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(unwrap_envelope(serde_json::from_str(&body)?))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        tracing::debug!(path, "GET");
        let response = self.request(Method::GET, path).send().await?;
        Self::parse_response(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        tracing::debug!(path, "POST");
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        tracing::debug!(path, "PUT");
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        tracing::debug!(path, "DELETE");
        let response = self.request(Method::DELETE, path).send().await?;
        Self::parse_response(response).await.map(|_| ())
    }
}

/// Strip a `{ "data": ... }` response envelope (optionally with `meta`).
///
/// Any other value is returned unchanged.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map)
            if map.contains_key("data") && map.keys().all(|k| k == "data" || k == "meta") =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn unwraps_data_envelope() {
        assert_eq!(unwrap_envelope(json!({"data": [1, 2]})), json!([1, 2]));
        assert_eq!(
            unwrap_envelope(json!({"data": {"id": 1}, "meta": {"total": 1}})),
            json!({"id": 1})
        );
    }

    #[test]
    fn leaves_bare_payloads_alone() {
        assert_eq!(unwrap_envelope(json!([1, 2])), json!([1, 2]));
        assert_eq!(
            unwrap_envelope(json!({"id": 1, "data": "x"})),
            json!({"id": 1, "data": "x"})
        );
        assert_eq!(unwrap_envelope(Value::Null), Value::Null);
    }

    #[test]
    fn error_status_maps_to_api_error() {
        let result = decode_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error":"name taken"}"#.to_string(),
        );
        assert_matches!(
            result,
            Err(ClientError::Api { status: 422, body }) if body.contains("name taken")
        );
    }

    #[test]
    fn empty_success_body_is_null() {
        assert_eq!(decode_body(StatusCode::NO_CONTENT, String::new()).unwrap(), Value::Null);
        assert_eq!(decode_body(StatusCode::OK, "  \n".to_string()).unwrap(), Value::Null);
    }

    #[test]
    fn success_body_is_unwrapped() {
        let value = decode_body(StatusCode::OK, r#"{"data":[{"id":1}]}"#.to_string()).unwrap();
        assert_eq!(value, json!([{"id": 1}]));
        assert_matches!(
            decode_body(StatusCode::OK, "not json".to_string()),
            Err(ClientError::Decode(_))
        );
    }

    #[test]
    fn builds_urls_against_api_root() {
        let config = ClientConfig {
            api_url: "https://grc.example.com/api/v1".into(),
            api_token: Some("t0ken".into()),
            request_timeout_secs: 5,
        };
        let transport = HttpTransport::new(&config).unwrap();
        let request = transport
            .request(Method::GET, "/audits")
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "https://grc.example.com/api/v1/audits");
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer t0ken"
        );
    }
}
