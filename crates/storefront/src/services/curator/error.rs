//! Curator service errors.

use thiserror::Error;

/// Errors that can occur when calling the hosted model service.
#[derive(Debug, Error)]
pub enum CuratorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The service answered without usable content.
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// The live streaming session failed or was torn down.
    #[error("Live session error: {0}")]
    Session(String),
}
