use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum RoomQError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Locker capacity limit reached")]
    CapacityLimit,

    #[error("Session is not being served")]
    NotServing,

    #[error("Queue is stopped")]
    QueueStopped,

    #[error("Invalid token signature: {0}")]
    InvalidSignature(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),

    #[error("Backend returned {status}: {body}")]
    Backend { status: StatusCode, body: String },

    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No admission token in request")]
    MissingToken,
}

impl IntoResponse for RoomQError {
    fn into_response(self) -> Response {
        let status = match &self {
            RoomQError::NotServing => StatusCode::NOT_FOUND,
            RoomQError::MissingToken => StatusCode::UNAUTHORIZED,
            RoomQError::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
            RoomQError::QueueStopped => StatusCode::SERVICE_UNAVAILABLE,
            RoomQError::CapacityLimit => StatusCode::TOO_MANY_REQUESTS,
            RoomQError::InvalidApiKey
            | RoomQError::Backend { .. }
            | RoomQError::Transport(_)
            | RoomQError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            RoomQError::Encoding(_) | RoomQError::InvalidUrl(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for RoomQError {
    fn from(err: reqwest::Error) -> Self {
        RoomQError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for RoomQError {
    fn from(err: serde_json::Error) -> Self {
        RoomQError::MalformedResponse(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for RoomQError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        RoomQError::InvalidSignature(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RoomQError>;
