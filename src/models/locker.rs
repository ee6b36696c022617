use serde::{Deserialize, Serialize};

/// A key/value entry stored in a session locker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockerItem {
    pub key: String,
    pub value: String,
    /// Max number of values that can be stored under this key.
    pub limit: i32,
    /// Max number of times this key/value pair can appear across all lockers of the room.
    #[serde(rename = "kvLimit")]
    pub kv_limit: i32,
}

impl LockerItem {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        limit: i32,
        kv_limit: i32,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            limit,
            kv_limit,
        }
    }
}

/// Body of a locker `PUT`.
#[derive(Debug, Serialize)]
pub struct PutLockerRequest<'a> {
    pub data: &'a [LockerItem],
    #[serde(rename = "expireAt")]
    pub expire_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct FindSessionsResponse {
    pub sessions: serde_json::Value,
}
