//! Client for the queue backend's serving-state endpoints.

use tracing::{debug, warn};

use crate::error::{Result, RoomQError};
use crate::models::{BackendStatus, QueueAction, ServingResponse, TokenIdResponse};
use crate::transport::{endpoint, ApiRequest, ApiResponse, HttpTransport};

/// Calls against the status endpoint and the room's queue backend.
#[derive(Clone)]
pub struct QueueBackend<T> {
    transport: T,
    client_id: String,
    status_endpoint: String,
    scheme: String,
}

impl<T: HttpTransport> QueueBackend<T> {
    pub fn new(transport: T, client_id: &str, status_endpoint: &str, scheme: &str) -> Self {
        Self {
            transport,
            client_id: client_id.to_string(),
            status_endpoint: status_endpoint.to_string(),
            scheme: scheme.to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve the backend host currently serving this room.
    ///
    /// Fails with `QueueStopped` when the operator has halted admission.
    pub async fn backend_host(&self) -> Result<String> {
        let url = endpoint(&self.status_endpoint, &[self.client_id.as_str()])?;
        let response = self.transport.send(ApiRequest::get(url)).await?;
        if !response.is_success() {
            warn!(status = %response.status, "Status endpoint returned an error");
            return Err(response.into_error());
        }

        let status: BackendStatus = response.json()?;
        if status.is_stopped() {
            warn!(client_id = %self.client_id, "Queue is stopped");
            return Err(RoomQError::QueueStopped);
        }

        status.backend.ok_or_else(|| {
            RoomQError::MalformedResponse("status response has no backend".to_string())
        })
    }

    /// Extend the serving slot of `token` and return the replacement token.
    pub async fn extend_serving(&self, host: &str, token: &str, seconds: u64) -> Result<String> {
        let action = QueueAction::Beep {
            client_id: &self.client_id,
            id: token,
            extend_serving_duration: seconds,
        };
        let response = self.post_queue_action(host, &action).await?;
        let body: TokenIdResponse = check_serving(response)?.json()?;
        debug!(client_id = %self.client_id, seconds, "Serving extended");
        Ok(body.id)
    }

    /// Unix seconds at which the serving slot of `token` ends.
    pub async fn serving_deadline(&self, host: &str, token: &str) -> Result<i64> {
        let url = endpoint(
            &self.backend_base(host),
            &["rooms", self.client_id.as_str(), "servings", token],
        )?;
        let response = self.transport.send(ApiRequest::get(url)).await?;
        let body: ServingResponse = check_serving(response)?.json()?;
        Ok(body.deadline)
    }

    pub async fn delete_serving(&self, host: &str, token: &str) -> Result<()> {
        let action = QueueAction::DeleteServing {
            client_id: &self.client_id,
            id: token,
        };
        let response = self.post_queue_action(host, &action).await?;
        let response = check_serving(response)?;
        debug!(client_id = %self.client_id, body = %response.body, "Serving deleted");
        Ok(())
    }

    async fn post_queue_action(
        &self,
        host: &str,
        action: &QueueAction<'_>,
    ) -> Result<ApiResponse> {
        let url = endpoint(&self.backend_base(host), &["queue", self.client_id.as_str()])?;
        self.transport.send(ApiRequest::post(url).json(action)?).await
    }

    fn backend_base(&self, host: &str) -> String {
        format!("{}://{}", self.scheme, host)
    }
}

/// Map serving-call statuses onto the error taxonomy.
fn check_serving(response: ApiResponse) -> Result<ApiResponse> {
    let status = response.status;
    if status.is_success() {
        return Ok(response);
    }
    match status.as_u16() {
        401 => Err(RoomQError::InvalidApiKey),
        404 => Err(RoomQError::NotServing),
        _ => {
            warn!(status = %status, "Unexpected serving response");
            Err(response.into_error())
        }
    }
}
