//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use roomq_admission::admission::{RequestContext, TokenCookie};
use roomq_admission::config::Config;
use roomq_admission::models::TokenClaims;
use roomq_admission::token::TokenSigner;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "room-456";
pub const SECRET: &str = "test-secret-key";

/// Config pointing both the status endpoint and the backend at `server`.
pub fn test_config(server: &MockServer) -> Config {
    let vars = HashMap::from([
        ("ROOMQ_CLIENT_ID".to_string(), CLIENT_ID.to_string()),
        ("ROOMQ_JWT_SECRET".to_string(), SECRET.to_string()),
        (
            "ROOMQ_TICKET_ISSUER".to_string(),
            "https://queue.example.com/enter".to_string(),
        ),
        (
            "ROOMQ_STATUS_ENDPOINT".to_string(),
            format!("{}/status", server.uri()),
        ),
        ("ROOMQ_BACKEND_SCHEME".to_string(), "http".to_string()),
        ("ROOMQ_API_KEY".to_string(), "api-key-1".to_string()),
        ("ROOMQ_LOCKER_URL".to_string(), server.uri()),
    ]);
    Config::from_vars(&vars).expect("Should build config")
}

/// Status endpoint reporting `state`, with the mock server itself as backend.
pub async fn mount_status(server: &MockServer, state: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/status/{}", CLIENT_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "state": state,
            "backend": server.address().to_string()
        })))
        .mount(server)
        .await;
}

pub fn sign(claims: &TokenClaims) -> String {
    TokenSigner::new(SECRET)
        .encode(claims)
        .expect("Should encode token")
}

pub fn decode(token: &str) -> TokenClaims {
    TokenSigner::new(SECRET)
        .decode(token)
        .expect("Should decode token")
}

pub fn serving_token(session_id: &str) -> String {
    sign(&TokenClaims {
        room_id: Some(CLIENT_ID.to_string()),
        session_id: Some(session_id.to_string()),
        token_type: None,
        deadline: Some(chrono::Utc::now().timestamp() + 600),
    })
}

/// In-memory request context recording every cookie write.
#[derive(Default)]
pub struct MemoryContext {
    pub url: String,
    pub cookies: HashMap<String, String>,
    pub written: Vec<TokenCookie>,
}

impl RequestContext for MemoryContext {
    fn query_param(&self, _name: &str) -> Option<String> {
        None
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }

    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn set_cookie(&mut self, cookie: TokenCookie) {
        self.written.push(cookie);
    }
}
