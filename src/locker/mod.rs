//! Per-session key/value locker kept by the backend.
//!
//! Thin pass-through: no caching, no retries. Every call carries the room's
//! API key and is scoped to the visitor's current token.

use tracing::warn;

use crate::error::{Result, RoomQError};
use crate::models::{FindSessionsResponse, LockerItem, PutLockerRequest};
use crate::transport::{endpoint, ApiRequest, ApiResponse, HttpTransport};

pub struct Locker<T> {
    transport: T,
    client_id: String,
    api_key: String,
    token: String,
    base_url: String,
}

impl<T: HttpTransport> Locker<T> {
    pub fn new(
        transport: T,
        client_id: &str,
        api_key: &str,
        token: &str,
        base_url: &str,
    ) -> Self {
        Self {
            transport,
            client_id: client_id.to_string(),
            api_key: api_key.to_string(),
            token: token.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Sessions of this room whose locker holds `key = value`.
    pub async fn find_sessions(&self, key: &str, value: &str) -> Result<serde_json::Value> {
        let url = endpoint(
            &self.base_url,
            &["api", "lockers", self.client_id.as_str(), "sessions"],
        )?;
        let request = self
            .authorized(ApiRequest::get(url))
            .query("key", key)
            .query("value", value);

        let response = check_read(self.transport.send(request).await?)?;
        let body: FindSessionsResponse = response.json()?;
        Ok(body.sessions)
    }

    /// Full locker content of the current session.
    pub async fn fetch(&self) -> Result<serde_json::Value> {
        let request = self.authorized(ApiRequest::get(self.session_url(None)?));
        let response = check_read(self.transport.send(request).await?)?;
        response.json()
    }

    /// Store `items`; the locker expires at `expire_at` (unix seconds).
    pub async fn put(&self, items: &[LockerItem], expire_at: i64) -> Result<()> {
        let body = PutLockerRequest {
            data: items,
            expire_at,
        };
        let request = self
            .authorized(ApiRequest::put(self.session_url(None)?))
            .json(&body)?;

        check_write(self.transport.send(request).await?)
    }

    /// Remove a single key from the locker.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let request = self.authorized(ApiRequest::delete(self.session_url(Some(key))?));
        check_write(self.transport.send(request).await?)
    }

    /// Remove every key from the locker.
    pub async fn flush(&self) -> Result<()> {
        let request = self.authorized(ApiRequest::delete(self.session_url(None)?));
        check_write(self.transport.send(request).await?)
    }

    fn session_url(&self, key: Option<&str>) -> Result<String> {
        let mut segments = vec![
            "api",
            "lockers",
            self.client_id.as_str(),
            "sessions",
            self.token.as_str(),
        ];
        segments.extend(key);
        endpoint(&self.base_url, &segments)
    }

    fn authorized(&self, request: ApiRequest) -> ApiRequest {
        request.header("Api-Key", &self.api_key)
    }
}

fn check_read(response: ApiResponse) -> Result<ApiResponse> {
    if response.status.as_u16() == 401 {
        return Err(RoomQError::InvalidApiKey);
    }
    if !response.is_success() {
        warn!(status = %response.status, "Locker read failed");
        return Err(response.into_error());
    }
    Ok(response)
}

fn check_write(response: ApiResponse) -> Result<()> {
    if response.status.as_u16() == 403 {
        return Err(RoomQError::CapacityLimit);
    }
    check_read(response).map(|_| ())
}
