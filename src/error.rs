//! Error types for OTX API operations.

use thiserror::Error;

/// Errors that can occur during OTX API operations.
#[derive(Debug, Error)]
pub enum OtxError {
    /// Configuration is missing or incomplete.
    #[error("OTX configuration required: {0}")]
    ConfigMissing(String),

    /// The client's API key is empty at request time.
    #[error("API key not set in client")]
    NoApiKey,

    /// The API key contains characters an HTTP header cannot carry.
    #[error("API key is not a valid header value")]
    InvalidApiKey,

    /// The server answered with a non-200 status.
    #[error("OTX API error: {message} (status {status_code})")]
    Api { message: String, status_code: u16 },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response whose body does not match the expected shape.
    #[error("Failed to parse response (status {status_code}): {source}; body: {body}")]
    Decode {
        status_code: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// There is no next or previous page. Iteration should stop.
    #[error("no more pages")]
    NoPage,

    /// A page link carried a `page` or `limit` that is not an integer.
    #[error("Invalid '{param}' value '{value}' in page link: {source}")]
    InvalidPageParam {
        param: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// None of the accepted timestamp encodings matched.
    #[error("Unparsable timestamp: {0}")]
    UnparsableTimestamp(String),

    /// JSON serialization error outside response decoding.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Query string serialization error.
    #[error("Failed to encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

impl OtxError {
    /// Returns true for the pagination terminal condition.
    pub fn is_no_page(&self) -> bool {
        matches!(self, OtxError::NoPage)
    }

    /// Returns true if this error came from a well-formed non-200 response.
    pub fn is_api_error(&self) -> bool {
        matches!(self, OtxError::Api { .. })
    }

    /// HTTP status attached to this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OtxError::Api { status_code, .. } | OtxError::Decode { status_code, .. } => {
                Some(*status_code)
            }
            OtxError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for OTX operations.
pub type Result<T> = core::result::Result<T, OtxError>;
