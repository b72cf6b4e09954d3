//! Error types for Ark API calls
//!
//! Every failure a client can observe while talking to the Ark API is
//! represented here. Callers above the transport pass these through with `?`
//! rather than translating them.

use thiserror::Error;

/// Errors that can occur when calling the Ark API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status code
    #[error("API returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text (may be empty)
        body: String,
    },

    /// A body could not be encoded, or a response did not have the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL or request path is not a valid URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration could not be loaded
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status code, if the API answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the API reported that the resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type alias for Ark API operations
pub type ApiResult<T> = Result<T, ApiError>;
