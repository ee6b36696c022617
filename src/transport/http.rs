use reqwest::Client;
use tracing::{debug, warn};

use super::{ApiRequest, ApiResponse, HttpTransport};
use crate::error::{Result, RoomQError};

/// [`HttpTransport`] over a shared `reqwest` client.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let ApiRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let res = builder.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "RoomQ request failed");
            RoomQError::Transport(e.to_string())
        })?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%method, %url, status = %status, "RoomQ response received");

        Ok(ApiResponse { status, body })
    }
}
