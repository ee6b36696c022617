use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of pass a token represents.
///
/// Values other than `queue` and `self-sign` are kept verbatim so that a
/// backend-issued token survives a decode/encode cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenType {
    /// Visitor is waiting in the queue, not yet admitted.
    Queue,
    /// Placeholder issued locally, never verified by the backend.
    SelfSign,
    Other(String),
}

impl From<String> for TokenType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "queue" => TokenType::Queue,
            "self-sign" => TokenType::SelfSign,
            _ => TokenType::Other(value),
        }
    }
}

impl From<TokenType> for String {
    fn from(value: TokenType) -> Self {
        match value {
            TokenType::Queue => "queue".to_string(),
            TokenType::SelfSign => "self-sign".to_string(),
            TokenType::Other(other) => other,
        }
    }
}

/// Claims carried by an admission token.
///
/// Every field is optional: backend-issued tokens do not always carry all of
/// them, and callers interpret absence through presence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenType>,
    /// Unix seconds after which the admission lapses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<i64>,
}

impl TokenClaims {
    /// Claims for a locally issued placeholder pass.
    pub fn self_signed(room_id: &str, session_id: &str) -> Self {
        Self {
            room_id: Some(room_id.to_string()),
            session_id: Some(session_id.to_string()),
            token_type: Some(TokenType::SelfSign),
            deadline: None,
        }
    }

    /// Compared at millisecond precision with no leeway.
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.deadline
            .is_some_and(|deadline| deadline.saturating_mul(1_000) < now.timestamp_millis())
    }
}
