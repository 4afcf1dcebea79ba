//! Error types for hstw workflows.

use hstw_hubspot::HubSpotError;

/// Error reading a source document.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Source string could not be interpreted.
    #[error("invalid source '{source_ref}': {message}")]
    Invalid {
        /// The source as given.
        source_ref: String,
        /// What is wrong with it.
        message: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} fetching {url}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Error from the upload and delete workflows.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Source could not be read.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// HubSpot API error.
    #[error(transparent)]
    HubSpot(#[from] HubSpotError),

    /// Text source that is neither markup nor HTML.
    #[error("Unknown file type: {0}")]
    UnknownContentType(String),

    /// Invalid parameters.
    #[error("{0}")]
    Config(String),
}
