//! Single-shot fetch, convert and publish

use crate::cache::KeySetCache;
use crate::config::ConvertOptions;
use crate::error::{ConversionError, Result};
use crate::jwks::builder::build;
use crate::jwks::fetch_jwks;
use crate::jwks::key_set::KeySet;
use crate::source::KeySetSource;
use std::sync::Arc;
use tracing::instrument;

/// What a successful refresh published
#[derive(Debug, Clone)]
pub struct Refreshed {
    /// The key set now held by the cache
    pub key_set: Arc<KeySet>,
    /// Keys that were skipped because they failed to convert
    pub errors: Vec<ConversionError>,
}

/// Fetch the key set document, convert every key and publish the result
///
/// Per-key conversion failures are logged and returned alongside the key set;
/// they never fail the refresh.
///
/// # Errors
///
/// Configuration and source errors are returned as-is and leave the cache
/// untouched, so a previously published key set survives a failed refresh.
#[instrument(skip(source, options, cache))]
pub async fn refresh<S>(
    source: &S,
    jwks_uri: &str,
    options: &ConvertOptions,
    cache: &KeySetCache,
) -> Result<Refreshed>
where
    S: KeySetSource + ?Sized,
{
    tracing::debug!(target: "jwkpem.refresh", url = %jwks_uri, "Fetching JWKS");

    let jwks = fetch_jwks(source, jwks_uri).await.map_err(|e| {
        tracing::error!(target: "jwkpem.refresh", url = %jwks_uri, error = %e, "Failed to fetch JWKS");
        e
    })?;

    let outcome = build(&jwks.keys, options);

    for err in &outcome.errors {
        tracing::warn!(
            target: "jwkpem.refresh",
            kid = err.kid.as_deref().unwrap_or_default(),
            error = %err.kind,
            "Skipping key that failed to convert"
        );
    }
    for kid in &outcome.duplicate_kids {
        tracing::warn!(target: "jwkpem.refresh", kid = %kid, "Duplicate kid in JWKS, keeping last occurrence");
    }

    let key_set = cache.update(outcome.key_set);

    tracing::info!(
        target: "jwkpem.refresh",
        keys = key_set.len(),
        skipped = outcome.errors.len(),
        "Key set refreshed"
    );

    Ok(Refreshed {
        key_set,
        errors: outcome.errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::FetchFuture;

    struct FailingSource;

    impl KeySetSource for FailingSource {
        fn fetch(&self, _url: &str) -> FetchFuture<'_> {
            Box::pin(async { Err(Error::SourceFetch("network: unreachable".into())) })
        }
    }

    #[tokio::test]
    async fn test_refresh_failure_leaves_cache_not_ready() {
        let cache = KeySetCache::new();
        let result = refresh(
            &FailingSource,
            "https://idp.example.com/jwks.json",
            &ConvertOptions::default(),
            &cache,
        )
        .await;

        assert!(result.is_err_and(|e| e.is_source_fetch()));
        assert!(!cache.is_ready());
    }

    #[tokio::test]
    async fn test_refresh_invalid_uri_is_configuration_error() {
        let cache = KeySetCache::new();
        let result = refresh(&FailingSource, "ftp://x", &ConvertOptions::default(), &cache).await;
        assert!(result.is_err_and(|e| e.is_configuration()));
    }
}
