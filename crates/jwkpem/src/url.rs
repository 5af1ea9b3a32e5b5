//! URL validation utilities
//!
//! Rejects empty, oversized, or non-HTTP key set URLs before any request is
//! made.

use crate::error::{Error, Result};
use crate::limits::MAX_JWKS_URI_LENGTH;

/// Validate JWKS URI format and size
pub(crate) fn validate_jwks_uri(uri: &str) -> Result<url::Url> {
    if uri.trim().is_empty() {
        return Err(Error::ConfigurationInvalid(
            "JWKS URI cannot be empty".into(),
        ));
    }

    if uri.len() > MAX_JWKS_URI_LENGTH {
        return Err(Error::SourceUrlTooLong {
            length: uri.len(),
            max: MAX_JWKS_URI_LENGTH,
        });
    }

    let parsed = uri
        .parse::<url::Url>()
        .map_err(|e| Error::ConfigurationInvalid(format!("invalid JWKS URI: {e}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::ConfigurationInvalid(
            "JWKS URI must use http or https scheme".into(),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(Error::ConfigurationInvalid(
            "JWKS URI must have a valid host".into(),
        ));
    }

    Ok(parsed)
}
