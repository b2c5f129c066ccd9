// ABOUTME: Error types for URL loading operations.
// ABOUTME: Distinguishes explicit cancellation from genuine transport and parse failures.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by a load operation.
///
/// `Cancelled` is not a failure in the usual sense: it reports that the
/// caller aborted the load before it completed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The load was aborted by the caller.
    #[error("load cancelled")]
    Cancelled,

    /// The URL could not be used for a request.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The request failed in transit.
    #[error("request failed: {0}")]
    Request(#[source] anyhow::Error),

    /// The response body was fetched but did not parse as a document.
    #[error("response is not a parsable document: {0}")]
    Parse(#[from] xmlkit_dom::ParseError),
}

impl LoadError {
    /// Creates an InvalidUrl error.
    pub fn invalid_url(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        LoadError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a Request error from an underlying transport failure.
    pub fn request(err: impl Into<anyhow::Error>) -> Self {
        LoadError::Request(err.into())
    }

    /// Returns true if the load was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LoadError::Cancelled)
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LoadError::Timeout(_))
    }
}
