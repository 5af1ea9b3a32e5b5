//! Key set sources
//!
//! A [`KeySetSource`] retrieves the raw bytes of a JWKS document for a URL.
//! [`ReqwestSource`] is the HTTP implementation; tests and embedders can
//! supply their own.

use crate::error::{Error, Result};
use crate::limits::MAX_JWKS_RESPONSE_SIZE;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Default request timeout for [`ReqwestSource`]
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Future returned by [`KeySetSource::fetch`]
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;

/// Retrieves a key set document
///
/// # Errors
///
/// Implementations report failures as [`Error::SourceFetch`] with messages
/// following the pattern `"component: error description"` (e.g.,
/// `"network: connection failed"`, `"http: status 404"`).
pub trait KeySetSource: Send + Sync {
    fn fetch(&self, url: &str) -> FetchFuture<'_>;
}

/// HTTP key set source backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestSource {
    client: reqwest::Client,
}

impl ReqwestSource {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Build a client whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(target: "jwkpem.source", error = %e, "Failed to build HTTP client with custom config, using defaults");
                reqwest::Client::new()
            });

        Self { client }
    }

    /// Reuse an existing client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestSource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySetSource for ReqwestSource {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let client = self.client.clone();
        let url = url.to_string();
        Box::pin(async move {
            let mut response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| Error::SourceFetch(format!("network: {e}")))?;

            if !response.status().is_success() {
                return Err(Error::SourceFetch(format!(
                    "http: status {}",
                    response.status()
                )));
            }

            if let Some(length) = response.content_length() {
                if length > MAX_JWKS_RESPONSE_SIZE as u64 {
                    return Err(Error::SourceResponseTooLarge {
                        size: usize::try_from(length).unwrap_or(usize::MAX),
                        max: MAX_JWKS_RESPONSE_SIZE,
                    });
                }
            }

            // Content-Length may be absent (chunked) or wrong, so bound the read too
            let mut body = Vec::new();
            while let Some(chunk) = response
                .chunk()
                .await
                .map_err(|e| Error::SourceFetch(format!("network: {e}")))?
            {
                let size = body.len() + chunk.len();
                if size > MAX_JWKS_RESPONSE_SIZE {
                    return Err(Error::SourceResponseTooLarge {
                        size,
                        max: MAX_JWKS_RESPONSE_SIZE,
                    });
                }
                body.extend_from_slice(&chunk);
            }

            Ok(body)
        })
    }
}
