use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::headers::{Cookie, HeaderMapExt, Host};

use crate::admission::{RequestContext, TokenCookie};

/// [`RequestContext`] backed by an axum request.
///
/// Cookies written by the controller are held until the context is returned
/// as part of the response, where they become `Set-Cookie` headers.
pub struct GateContext {
    url: String,
    query: HashMap<String, String>,
    cookies: Option<Cookie>,
    pending: Vec<TokenCookie>,
}

impl GateContext {
    pub fn from_parts(parts: &Parts) -> Self {
        let host = parts
            .headers
            .typed_get::<Host>()
            .map(|host| match host.port() {
                Some(port) => format!("{}:{}", host.hostname(), port),
                None => host.hostname().to_string(),
            })
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());
        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("http");
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(query)| query)
            .unwrap_or_default();

        Self {
            url: format!("{}://{}{}", scheme, host, path_and_query),
            query,
            cookies: parts.headers.typed_get::<Cookie>(),
            pending: Vec::new(),
        }
    }
}

impl RequestContext for GateContext {
    fn query_param(&self, name: &str) -> Option<String> {
        self.query.get(name).cloned()
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies
            .as_ref()
            .and_then(|cookies| cookies.get(name))
            .map(str::to_string)
    }

    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn set_cookie(&mut self, cookie: TokenCookie) {
        self.pending.push(cookie);
    }
}

impl<S> FromRequestParts<S> for GateContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

impl IntoResponseParts for GateContext {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for cookie in self.pending {
            match HeaderValue::from_str(&cookie.to_header_value()) {
                Ok(value) => {
                    res.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::warn!(error = %e, "Dropping unrepresentable cookie"),
            }
        }
        Ok(res)
    }
}
