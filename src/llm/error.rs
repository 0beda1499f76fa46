//! LLM error types.
//!
//! Every failure of a provider call ends up as an [`LlmError`]; the request
//! handler turns it into an `error` payload. There is no retry layer, so the
//! kind is only used for logging and for the message shown to the caller.

use std::time::Duration;

/// Error from LLM API calls.
#[derive(Debug)]
pub struct LlmError {
    /// The kind of error
    pub kind: LlmErrorKind,
    /// HTTP status code, if applicable
    pub status_code: Option<u16>,
    /// Error message
    pub message: String,
}

impl LlmError {
    /// Create an error for a non-success HTTP response.
    pub fn from_status(status_code: u16, message: String) -> Self {
        Self {
            kind: classify_http_status(status_code),
            status_code: Some(status_code),
            message,
        }
    }

    /// Create a network error.
    pub fn network_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::NetworkError,
            status_code: None,
            message,
        }
    }

    /// Create a timeout error.
    pub fn timeout(after: Duration) -> Self {
        Self {
            kind: LlmErrorKind::Timeout,
            status_code: None,
            message: format!("no response from provider after {:?}", after),
        }
    }

    /// Create a parse error.
    pub fn parse_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::ParseError,
            status_code: None,
            message,
        }
    }

    /// Create an empty-response error.
    pub fn empty_response(message: String) -> Self {
        Self {
            kind: LlmErrorKind::EmptyResponse,
            status_code: None,
            message,
        }
    }
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} (HTTP {}): {}", self.kind, code, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for LlmError {}

/// Classification of LLM errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Rate limited (429)
    RateLimited,
    /// Credential rejected (401, 403)
    Auth,
    /// Other 4xx (bad request, unknown model, ...)
    ClientError,
    /// Server error (5xx)
    ServerError,
    /// Connection failed or dropped
    NetworkError,
    /// Call exceeded the configured timeout
    Timeout,
    /// Response body could not be decoded
    ParseError,
    /// Provider answered without any usable text
    EmptyResponse,
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmErrorKind::RateLimited => write!(f, "Rate limited"),
            LlmErrorKind::Auth => write!(f, "Authentication failed"),
            LlmErrorKind::ClientError => write!(f, "Client error"),
            LlmErrorKind::ServerError => write!(f, "Server error"),
            LlmErrorKind::NetworkError => write!(f, "Network error"),
            LlmErrorKind::Timeout => write!(f, "Timeout"),
            LlmErrorKind::ParseError => write!(f, "Parse error"),
            LlmErrorKind::EmptyResponse => write!(f, "Empty response"),
        }
    }
}

/// Parse HTTP status code into error kind.
pub fn classify_http_status(status: u16) -> LlmErrorKind {
    match status {
        429 => LlmErrorKind::RateLimited,
        401 | 403 => LlmErrorKind::Auth,
        400..=499 => LlmErrorKind::ClientError,
        _ => LlmErrorKind::ServerError,
    }
}
