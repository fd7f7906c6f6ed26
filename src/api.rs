//! Resource fetching from the remote data location.
//!
//! Every page's data lives in one JSON document served from a fixed,
//! version-pinned base location as `<base>/<resource>.json`. This module
//! retrieves those documents and decodes them into the typed records of
//! [`crate::models`].
//!
//! # Architecture
//!
//! - [`ResourceSource`]: core trait describing "give me resource X as JSON"
//! - [`HttpSource`]: the production implementation on top of `reqwest`
//! - [`fetch`]: the null-sentinel contract; any failure is logged and
//!   surfaces as `None`
//! - [`decode`]: validation at the fetch boundary; a document of the wrong
//!   shape becomes [`FetchError::Malformed`] instead of partial markup
//!
//! No retry, backoff, or timeout is applied. A failed fetch is reported
//! once; a hung request never completes.

use crate::error::FetchError;
use crate::utils::truncate_for_log;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, instrument};
use url::Url;

/// Trait for retrieving a named JSON resource.
///
/// Implementors return the parsed JSON document for `resource` (a bare name
/// such as `"news"`, without extension).
pub trait ResourceSource {
    async fn get_json(&self, resource: &str) -> Result<Value, FetchError>;
}

/// Fetches resources over HTTP(S) from a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    /// Create a source rooted at `base_url`.
    ///
    /// A trailing slash is added when missing so that resource names resolve
    /// beneath the base path rather than replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base: Url::parse(&base)?,
        })
    }

    /// Absolute URL of `<base>/<resource>.json`.
    pub fn resource_url(&self, resource: &str) -> Result<Url, FetchError> {
        Ok(self.base.join(&format!("{resource}.json"))?)
    }
}

impl ResourceSource for HttpSource {
    #[instrument(level = "info", skip(self))]
    async fn get_json(&self, resource: &str) -> Result<Value, FetchError> {
        let url = self.resource_url(resource)?;
        let t0 = Instant::now();
        let resp = self.client.get(url.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = resp.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched resource body"
        );
        serde_json::from_str(&body).map_err(|e| {
            debug!(preview = %truncate_for_log(&body, 200), "Body is not JSON");
            FetchError::Parse(e)
        })
    }
}

/// Fetch `resource` and return its JSON document, or `None` on any failure.
///
/// Failures are logged and never raised to the caller.
pub async fn fetch<S: ResourceSource>(source: &S, resource: &str) -> Option<Value> {
    match source.get_json(resource).await {
        Ok(value) => Some(value),
        Err(e) => {
            error!(%resource, error = %e, "Failed to fetch resource");
            None
        }
    }
}

/// Decode an untyped document into the typed record for `resource`.
///
/// A missing top-level collection is not an error here; only a document
/// whose present fields have the wrong shape is rejected.
pub fn decode<T: DeserializeOwned>(resource: &'static str, value: Value) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|source| FetchError::Malformed { resource, source })
}
