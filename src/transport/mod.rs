//! HTTP seam between the admission logic and the RoomQ REST API.
//!
//! Everything that talks to the backend goes through [`HttpTransport::send`],
//! so tests can swap the network for a mock server or an in-process fake.

pub mod http;

pub use http::ReqwestTransport;

use std::future::Future;

use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, RoomQError};

/// A single outbound call to the backend.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(
            serde_json::to_value(body).map_err(|e| RoomQError::Encoding(e.to_string()))?,
        );
        Ok(self)
    }
}

/// Raw backend answer: status plus undecoded body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Generic failure carrying the body for diagnostics.
    pub fn into_error(self) -> RoomQError {
        RoomQError::Backend {
            status: self.status,
            body: self.body,
        }
    }
}

/// Sends requests to the backend.
///
/// Implementations must not retry and must not apply their own timeouts;
/// any non-2xx answer is returned as a response, not an error. Only
/// connection-level failures produce `RoomQError::Transport`.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse>> + Send;
}

/// Append percent-encoded path segments to `base`.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<String> {
    let mut url =
        Url::parse(base).map_err(|e| RoomQError::InvalidUrl(format!("{}: {}", base, e)))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| RoomQError::InvalidUrl(format!("{}: cannot be a base", base)))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let url = endpoint("https://status.example.com", &["room-1"]).unwrap();
        assert_eq!(url, "https://status.example.com/room-1");

        let url = endpoint("https://status.example.com/v1/", &["room-1"]).unwrap();
        assert_eq!(url, "https://status.example.com/v1/room-1");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint("https://api.example.com", &["lockers", "a b/c"]).unwrap();
        assert_eq!(url, "https://api.example.com/lockers/a%20b%2Fc");
    }

    #[test]
    fn test_endpoint_rejects_relative_base() {
        assert!(matches!(
            endpoint("not a url", &["x"]),
            Err(RoomQError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("https://api.example.com/x")
            .query("key", "seat")
            .header("Api-Key", "k")
            .json(&serde_json::json!({"a": 1}))
            .unwrap();

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.query, vec![("key".to_string(), "seat".to_string())]);
        assert_eq!(request.headers, vec![("Api-Key".to_string(), "k".to_string())]);
        assert_eq!(request.body, Some(serde_json::json!({"a": 1})));
    }

    #[test]
    fn test_non_success_response_into_error() {
        let response = ApiResponse::new(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(!response.is_success());

        match response.into_error() {
            RoomQError::Backend { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
