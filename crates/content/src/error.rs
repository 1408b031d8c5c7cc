//! Errors for content store access.

use thiserror::Error;

/// Errors that can occur when talking to a content backend.
///
/// Every remote call in the facade is independently wrapped; none of these
/// are fatal to the site. Callers log and continue with the in-memory value.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed (network, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned an error response.
    #[error("store error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The store rejected our identity.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Failed to parse a response or cached blob.
    #[error("parse error: {0}")]
    Parse(String),

    /// Local cache file could not be read or written.
    #[error("cache I/O error: {0}")]
    Io(String),
}

impl ContentError {
    /// Whether this is a permission failure rather than an availability one.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}
