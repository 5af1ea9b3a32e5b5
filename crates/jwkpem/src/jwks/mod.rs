//! JSON Web Key Set (JWKS) module
//!
//! Parsing of JWKS documents as defined in
//! [RFC 7517](https://datatracker.ietf.org/doc/html/rfc7517), conversion of
//! individual keys and materialisation of a key set indexed by `kid`.

pub(crate) mod builder;
pub(crate) mod codec;
pub(crate) mod jwk;
pub(crate) mod key_set;

use crate::error::{Error, Result};
use crate::jwks::jwk::JwkSet;
use crate::limits::{MAX_JWKS_RESPONSE_SIZE, MAX_JWK_SET_SIZE};
use crate::source::KeySetSource;
use crate::url::validate_jwks_uri;

/// Fetch and parse a JWKS document from the given URI using the provided source
///
/// # Errors
///
/// Configuration errors for an invalid URI, otherwise source errors with
/// component-prefixed messages (`"jwks: ..."`, `"network: ..."`, `"http: ..."`).
pub async fn fetch_jwks<S>(source: &S, jwks_uri: &str) -> Result<JwkSet>
where
    S: KeySetSource + ?Sized,
{
    validate_jwks_uri(jwks_uri)?;

    let bytes = source.fetch(jwks_uri).await?;

    // Validate response size before parsing to prevent resource exhaustion
    if bytes.len() > MAX_JWKS_RESPONSE_SIZE {
        return Err(Error::SourceResponseTooLarge {
            size: bytes.len(),
            max: MAX_JWKS_RESPONSE_SIZE,
        });
    }

    let body = std::str::from_utf8(&bytes)
        .map_err(|e| Error::SourceFetch(format!("jwks: utf8 decode failed: {e}")))?;

    let set = JwkSet::from_json(body)
        .map_err(|_| Error::SourceFetch("jwks: invalid jwks json".to_string()))?;

    if set.keys.len() > MAX_JWK_SET_SIZE {
        return Err(Error::KeySetTooLarge {
            key_count: set.keys.len(),
            max: MAX_JWK_SET_SIZE,
        });
    }

    Ok(set)
}
