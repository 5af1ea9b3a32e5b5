//! Errors for jwkpem

use std::time::Duration;
use thiserror::Error;

/// jwkpem Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    // ============================================================================
    // Source Errors
    // ============================================================================
    #[error("Key set source error: {0}")]
    SourceFetch(String),

    #[error("Key set source URL too long: {length} characters (maximum: {max} characters)")]
    SourceUrlTooLong { length: usize, max: usize },

    #[error("Key set source response too large: {size} bytes (maximum: {max} bytes)")]
    SourceResponseTooLarge { size: usize, max: usize },

    #[error("JWK set too large: {key_count} keys (maximum: {max} keys)")]
    KeySetTooLarge { key_count: usize, max: usize },

    // ============================================================================
    // Cache Errors
    // ============================================================================
    #[error("Key set not ready after {waited:?}")]
    ReadyTimeout { waited: Duration },

    #[error("Key set cache closed")]
    CacheClosed,
}

impl Error {
    /// Whether this error came from retrieving or parsing the key set document
    pub fn is_source_fetch(&self) -> bool {
        matches!(
            self,
            Error::SourceFetch(_)
                | Error::SourceResponseTooLarge { .. }
                | Error::KeySetTooLarge { .. }
        )
    }

    /// Whether this error was raised before any network call was attempted
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::ConfigurationInvalid(_) | Error::SourceUrlTooLong { .. }
        )
    }
}

/// Why a single JWK could not be converted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionErrorKind {
    #[error("unsupported key type '{0}'")]
    UnsupportedKeyType(String),

    #[error("malformed key material: {0}")]
    MalformedKeyMaterial(String),
}

/// A per-key conversion failure, tagged with the key ID when the JWK had one
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("key '{}': {kind}", kid_label(.kid))]
pub struct ConversionError {
    pub kid: Option<String>,
    pub kind: ConversionErrorKind,
}

impl ConversionError {
    pub(crate) fn new(kid: Option<String>, kind: ConversionErrorKind) -> Self {
        Self { kid, kind }
    }

    /// True for [`ConversionErrorKind::UnsupportedKeyType`]
    pub fn is_unsupported_key_type(&self) -> bool {
        matches!(self.kind, ConversionErrorKind::UnsupportedKeyType(_))
    }
}

fn kid_label(kid: &Option<String>) -> &str {
    kid.as_deref().unwrap_or("<no kid>")
}

/// Result type alias for jwkpem operations
pub type Result<T> = std::result::Result<T, Error>;
