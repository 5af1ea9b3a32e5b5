//! Materialise a key set from raw JWK records

use crate::config::ConvertOptions;
use crate::error::ConversionError;
use crate::jwks::codec::convert;
use crate::jwks::jwk::Jwk;
use crate::jwks::key_set::KeySet;

/// Result of converting a batch of JWKs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Every key that converted successfully
    pub key_set: KeySet,
    /// One entry per key that failed to convert
    pub errors: Vec<ConversionError>,
    /// Key IDs that appeared more than once; the last occurrence is kept
    pub duplicate_kids: Vec<String>,
}

/// Convert every record independently
///
/// A failing record never aborts the batch. Its error is collected and its
/// `kid` is absent from the resulting key set.
pub fn build(raw_keys: &[Jwk], options: &ConvertOptions) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();

    for jwk in raw_keys {
        match convert(jwk, options) {
            Ok(key) => {
                if let Some(previous) = outcome.key_set.insert(key) {
                    outcome.duplicate_kids.push(previous.kid);
                }
            }
            Err(err) => outcome.errors.push(err),
        }
    }

    outcome
}
