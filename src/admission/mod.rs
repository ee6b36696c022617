//! Per-request admission decisions for a room.
//!
//! The controller never stores the visitor's token: it reads it from the
//! [`RequestContext`], returns the token that is current after the call and
//! writes it back through [`RequestContext::set_cookie`].

pub mod context;
pub mod url;

pub use context::{RequestContext, TokenCookie, TOKEN_COOKIE_LIFETIME_HOURS};
pub use url::{has_token_param, issuer_redirect, strip_token, TOKEN_PARAM};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::QueueBackend;
use crate::config::Config;
use crate::error::Result;
use crate::locker::Locker;
use crate::models::{Admission, Decision, TokenClaims, TokenType, ValidationResult};
use crate::token::TokenSigner;
use crate::transport::HttpTransport;

pub struct AdmissionController<T> {
    client_id: String,
    ticket_issuer: String,
    cookie_name: String,
    signer: TokenSigner,
    backend: QueueBackend<T>,
}

impl<T: HttpTransport> AdmissionController<T> {
    pub fn new(config: &Config, transport: T) -> Self {
        Self {
            client_id: config.client_id.clone(),
            ticket_issuer: config.ticket_issuer.clone(),
            cookie_name: config.token_cookie_name(),
            signer: TokenSigner::new(&config.jwt_secret),
            backend: QueueBackend::new(
                transport,
                &config.client_id,
                &config.status_endpoint,
                &config.backend_scheme,
            ),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Token presented by the request: the query parameter wins over the cookie.
    ///
    /// An empty value counts as no token.
    pub fn current_token<C: RequestContext>(&self, ctx: &C) -> Option<String> {
        ctx.query_param(TOKEN_PARAM)
            .or_else(|| ctx.cookie(&self.cookie_name))
            .filter(|token| !token.is_empty())
    }

    pub fn validate<C: RequestContext>(
        &self,
        ctx: &mut C,
        return_url: Option<&str>,
        session_id: Option<&str>,
    ) -> Result<Admission> {
        self.validate_at(ctx, return_url, session_id, Utc::now())
    }

    /// Decide whether the visitor enters or goes to the ticket issuer.
    ///
    /// Writes exactly one cookie. Performs no network calls.
    pub fn validate_at<C: RequestContext>(
        &self,
        ctx: &mut C,
        return_url: Option<&str>,
        session_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Admission> {
        let presented = self.current_token(ctx);
        let decision = self.evaluate(presented.as_deref(), session_id, now);
        debug!(client_id = %self.client_id, ?decision, "Token evaluated");

        let token = match presented {
            Some(token) if !decision.regenerates_token() => token,
            _ => {
                info!(client_id = %self.client_id, ?decision, "Issuing self-signed token");
                self.generate_token(session_id)?
            }
        };

        self.persist(ctx, &token, now);

        let current_url = ctx.current_url();
        let redirect_url = if decision.requires_issuer() {
            Some(issuer_redirect(
                &self.ticket_issuer,
                &token,
                &self.client_id,
                return_url.unwrap_or(&current_url),
            )?)
        } else if has_token_param(&current_url) {
            Some(strip_token(&current_url))
        } else {
            None
        };

        Ok(Admission {
            result: ValidationResult {
                redirect_url,
                decision,
            },
            token,
        })
    }

    /// First matching rule wins.
    fn evaluate(
        &self,
        token: Option<&str>,
        session_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Decision {
        let Some(token) = token else {
            return Decision::NoToken;
        };

        let claims = match self.signer.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Presented token rejected");
                return Decision::InvalidToken;
            }
        };

        if let (Some(expected), Some(actual)) = (session_id, claims.session_id.as_deref()) {
            if expected != actual {
                return Decision::SessionMismatch;
            }
        }

        // TODO: apply a configurable clock-skew leeway once the backend documents its tolerance.
        if claims.deadline_passed(now) {
            return Decision::DeadlineExceeded;
        }

        match claims.token_type {
            Some(TokenType::Queue) => Decision::Queued,
            Some(TokenType::SelfSign) => Decision::SelfSigned,
            _ => Decision::Admitted,
        }
    }

    fn generate_token(&self, session_id: Option<&str>) -> Result<String> {
        let session_id = session_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        self.signer
            .encode(&TokenClaims::self_signed(&self.client_id, &session_id))
    }

    fn persist<C: RequestContext>(&self, ctx: &mut C, token: &str, now: DateTime<Utc>) {
        ctx.set_cookie(TokenCookie::new(&self.cookie_name, token, now));
    }

    /// Extend the visitor's serving slot by `duration_minutes`.
    ///
    /// On success the backend's replacement token is written as the cookie and
    /// returned. On failure nothing is written.
    pub async fn extend<C: RequestContext>(
        &self,
        ctx: &mut C,
        token: &str,
        duration_minutes: u32,
    ) -> Result<String> {
        let host = self.backend.backend_host().await?;
        let seconds = u64::from(duration_minutes) * 60;
        let new_token = self.backend.extend_serving(&host, token, seconds).await?;

        self.persist(ctx, &new_token, Utc::now());
        info!(client_id = %self.client_id, duration_minutes, "Serving extended");
        Ok(new_token)
    }

    /// Unix seconds at which the visitor's serving slot ends.
    pub async fn get_serving(&self, token: &str) -> Result<i64> {
        let host = self.backend.backend_host().await?;
        self.backend.serving_deadline(&host, token).await
    }

    /// End the serving slot and hand the visitor a fresh self-signed token
    /// under the same session id.
    pub async fn delete_serving<C: RequestContext>(
        &self,
        ctx: &mut C,
        token: &str,
    ) -> Result<String> {
        let host = self.backend.backend_host().await?;
        self.backend.delete_serving(&host, token).await?;

        let session_id = match self.signer.decode(token) {
            Ok(claims) => claims.session_id,
            Err(e) => {
                warn!(error = %e, "Retired token unreadable, starting a new session");
                None
            }
        };
        let new_token = self.generate_token(session_id.as_deref())?;

        self.persist(ctx, &new_token, Utc::now());
        info!(client_id = %self.client_id, "Serving deleted");
        Ok(new_token)
    }

    /// Host of the backend currently serving this room.
    pub async fn get_backend(&self) -> Result<String> {
        self.backend.backend_host().await
    }
}

impl<T: HttpTransport + Clone> AdmissionController<T> {
    /// Locker of the session identified by `token`.
    pub fn locker(&self, api_key: &str, url: &str, token: &str) -> Locker<T> {
        Locker::new(
            self.backend.transport().clone(),
            &self.client_id,
            api_key,
            token,
            url,
        )
    }
}
