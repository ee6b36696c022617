use serde::{Deserialize, Serialize};

/// Response of the status endpoint for a room.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendStatus {
    pub state: String,
    #[serde(default)]
    pub backend: Option<String>,
}

impl BackendStatus {
    pub fn is_stopped(&self) -> bool {
        self.state == "stopped"
    }
}

/// Body of `POST /queue/{client_id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum QueueAction<'a> {
    Beep {
        client_id: &'a str,
        id: &'a str,
        extend_serving_duration: u64,
    },
    DeleteServing {
        client_id: &'a str,
        id: &'a str,
    },
}

/// Token id returned after a successful beep.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenIdResponse {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServingResponse {
    pub deadline: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beep_serialization() {
        let action = QueueAction::Beep {
            client_id: "room",
            id: "tok",
            extend_serving_duration: 600,
        };

        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "beep",
                "client_id": "room",
                "id": "tok",
                "extend_serving_duration": 600
            })
        );
    }

    #[test]
    fn test_delete_serving_serialization() {
        let action = QueueAction::DeleteServing {
            client_id: "room",
            id: "tok",
        };

        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"action\":\"delete_serving\""));
        assert!(!json.contains("extend_serving_duration"));
    }

    #[test]
    fn test_backend_status_deserialization() {
        let status: BackendStatus =
            serde_json::from_str(r#"{"state":"stopped","backend":"x"}"#).unwrap();
        assert!(status.is_stopped());

        let status: BackendStatus = serde_json::from_str(r#"{"state":"running"}"#).unwrap();
        assert!(!status.is_stopped());
        assert!(status.backend.is_none());
    }
}
