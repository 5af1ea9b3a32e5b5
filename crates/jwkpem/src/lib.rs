//! # jwkpem - JWKS to PEM/DER key material
//!
//! Fetches the JSON Web Key Set published by an identity provider and turns
//! each RSA key into the PEM (and optionally PKCS#1 DER) encoding a JWT
//! verifier needs. It is a bootstrap utility for a verification pipeline, not
//! a verifier.
//!
//! ```text
//! KeySetSource ──bytes──▶ fetch_jwks ──JwkSet──▶ build_key_set ──KeySet──▶ KeySetCache
//!                                                  │ convert_jwk per key
//!                                                  └─▶ Vec<ConversionError>
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwkpem::{refresh, CognitoConfig, ConvertOptions, KeySetCache, ReqwestSource};
//!
//! let config = CognitoConfig::new("eu-west-1", "eu-west-1_AbCdEf")?;
//! let cache = KeySetCache::new();
//!
//! let refreshed = refresh(
//!     &ReqwestSource::new(),
//!     &config.jwks_uri()?,
//!     &ConvertOptions::new().include_der(true),
//!     &cache,
//! )
//! .await?;
//!
//! // Elsewhere: wait for the first key set instead of racing an empty cache
//! let keys = cache.await_ready(Duration::from_secs(5)).await?;
//! ```
//!
//! ## Failure policy
//!
//! - A key that cannot be converted (unsupported `kty`, malformed material) is
//!   skipped and reported; the rest of the set is still published.
//! - A failed fetch never touches the cache.

mod cache;
mod config;
mod error;
mod jwks;
mod refresh;
mod source;

// Internal modules
pub(crate) mod limits;
pub(crate) mod url;
pub(crate) mod utils;

// Public Interface
pub use cache::KeySetCache;
pub use config::{CognitoConfig, ConvertOptions, PemFormat};
pub use error::{ConversionError, ConversionErrorKind, Error, Result};
pub use jwks::builder::{build as build_key_set, BuildOutcome};
pub use jwks::codec::{convert as convert_jwk, ConvertedKey};
pub use jwks::fetch_jwks;
pub use jwks::jwk::{Jwk, JwkSet};
pub use jwks::key_set::KeySet;
pub use refresh::{refresh, Refreshed};
pub use source::{FetchFuture, KeySetSource, ReqwestSource, DEFAULT_FETCH_TIMEOUT};
