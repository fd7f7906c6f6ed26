//! Error types for fetching and decoding resources.

use thiserror::Error;

/// Everything that can go wrong between issuing a resource request and
/// holding a typed document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FetchError {
    /// The resource URL could not be built from the base location.
    #[error("invalid resource URL: {0}")]
    Url(#[from] url::ParseError),

    /// Connection, TLS, or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body was not JSON.
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body was JSON but not the shape the resource requires.
    #[error("malformed {resource} data: {source}")]
    Malformed {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::Malformed { .. })
    }
}
