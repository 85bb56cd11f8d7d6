//! Error types for the input client

use thiserror::Error;

/// Errors that can occur while fetching a puzzle input
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with something other than 2xx
    #[error("Invalid HTTP status: {status}")]
    InvalidStatus {
        /// The status code that was received
        status: reqwest::StatusCode,
    },

    /// Failed to decode response as UTF-8
    #[error("Failed to decode response as UTF-8")]
    Encoding,

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl FetchError {
    /// Whether the server turned the session token away.
    ///
    /// The puzzle site redirects or answers 400/401 when the cookie is stale.
    pub fn is_session_rejected(&self) -> bool {
        match self {
            FetchError::InvalidStatus { status } => {
                status.is_redirection()
                    || *status == reqwest::StatusCode::BAD_REQUEST
                    || *status == reqwest::StatusCode::UNAUTHORIZED
            }
            _ => false,
        }
    }
}
