//! Error types for REST API operations

use kraken_auth::AuthError;
use kraken_types::error_codes::KrakenApiError;
use kraken_types::DecodeError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Transport failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status whose body was not a Kraken envelope
    #[error("HTTP status {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The exchange reported one or more errors
    #[error("API error: {}", .errors.join(", "))]
    Api {
        /// Error strings exactly as returned, in order
        errors: Vec<String>,
        /// Classification of the first error
        error: KrakenApiError,
    },

    /// The response did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Credentials could not be used to sign the request
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Invalid request parameters, rejected before sending
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RestError {
    /// Create an API error from the `error` array of a response
    pub fn from_api_errors(errors: Vec<String>) -> Self {
        let error = KrakenApiError::parse(errors.first().map(String::as_str).unwrap_or_default());
        Self::Api { errors, error }
    }

    /// Exchange-reported error strings, if this is an API error
    pub fn api_errors(&self) -> Option<&[String]> {
        match self {
            Self::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Whether repeating the same request may succeed
    ///
    /// Advisory only; the client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Api { error, .. } => error.is_retryable(),
            _ => false,
        }
    }

    /// Whether the exchange or a proxy signalled rate limiting
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429,
            Self::Api { error, .. } => error.is_rate_limit(),
            _ => false,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
