/// Branch of the validation state machine that decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    NoToken,
    InvalidToken,
    SessionMismatch,
    DeadlineExceeded,
    Queued,
    SelfSigned,
    Admitted,
}

impl Decision {
    /// Whether this branch discards the presented token and mints a new one.
    pub fn regenerates_token(self) -> bool {
        matches!(
            self,
            Decision::NoToken | Decision::InvalidToken | Decision::SessionMismatch
        )
    }

    /// Whether the visitor must go through the ticket issuer.
    pub fn requires_issuer(self) -> bool {
        !matches!(self, Decision::Admitted)
    }
}

/// Outcome of validating a request.
///
/// `redirect_url` is `None` when the visitor may proceed in place. An admitted
/// visitor whose URL still carried the token gets the cleansed URL here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub redirect_url: Option<String>,
    pub decision: Decision,
}

impl ValidationResult {
    pub fn need_redirect(&self) -> bool {
        self.redirect_url.is_some()
    }

    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }
}

/// Validation outcome together with the token that is now current for the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub result: ValidationResult,
    pub token: String,
}
