use std::collections::HashMap;
use std::env;
use std::fmt;

use reqwest::Url;

/// Scheme used to reach the backend host returned by the status endpoint.
pub const DEFAULT_BACKEND_SCHEME: &str = "https";

#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub jwt_secret: String,
    pub ticket_issuer: String,
    pub status_endpoint: String,
    pub backend_scheme: String,
    pub api_key: Option<String>,
    pub locker_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout_seconds: u64,
}

/// Secrets are redacted so the config can be logged.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("jwt_secret", &"[REDACTED]")
            .field("ticket_issuer", &self.ticket_issuer)
            .field("status_endpoint", &self.status_endpoint)
            .field("backend_scheme", &self.backend_scheme)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("locker_url", &self.locker_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a map of variables (used by tests).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let required = |name: &str| {
            vars.get(name)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };
        let required_url = |name: &str| {
            let value = required(name)?;
            Url::parse(&value).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))?;
            Ok::<_, ConfigError>(value)
        };

        Ok(Config {
            client_id: required("ROOMQ_CLIENT_ID")?,
            jwt_secret: required("ROOMQ_JWT_SECRET")?,
            ticket_issuer: required_url("ROOMQ_TICKET_ISSUER")?,
            status_endpoint: required_url("ROOMQ_STATUS_ENDPOINT")?,
            backend_scheme: vars
                .get("ROOMQ_BACKEND_SCHEME")
                .cloned()
                .unwrap_or_else(|| DEFAULT_BACKEND_SCHEME.to_string()),
            api_key: vars.get("ROOMQ_API_KEY").cloned(),
            locker_url: vars.get("ROOMQ_LOCKER_URL").cloned(),
            server_host: vars
                .get("SERVER_HOST")
                .cloned()
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: vars
                .get("SERVER_PORT")
                .map(String::as_str)
                .unwrap_or("8080")
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            request_timeout_seconds: vars
                .get("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Name of the cookie carrying the admission token for this room.
    pub fn token_cookie_name(&self) -> String {
        format!("be_roomq_t_{}", self.client_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Invalid URL in {0}: {1}")]
    InvalidUrl(String, String),
}
