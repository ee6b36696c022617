use chrono::{DateTime, Duration, Utc};

/// Lifetime of the token cookie, refreshed on every write.
pub const TOKEN_COOKIE_LIFETIME_HOURS: i64 = 12;

/// What the controller needs from the surrounding web framework.
///
/// One context belongs to one inbound request.
pub trait RequestContext {
    fn query_param(&self, name: &str) -> Option<String>;

    fn cookie(&self, name: &str) -> Option<String>;

    /// Absolute URL of the request, query string included.
    fn current_url(&self) -> String;

    fn set_cookie(&mut self, cookie: TokenCookie);
}

/// Token cookie to be written on the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
}

impl TokenCookie {
    pub fn new(name: &str, value: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            expires: now + Duration::hours(TOKEN_COOKIE_LIFETIME_HOURS),
        }
    }

    /// Render as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        format!(
            "{}={}; Expires={}; Path=/",
            self.name,
            self.value,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT")
        )
    }
}
