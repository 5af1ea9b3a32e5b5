//! Configuration for locating a Cognito user pool's key set and for
//! choosing which encodings to produce

use crate::error::{Error, Result};
use crate::url::validate_jwks_uri;
use std::collections::HashMap;

/// Location of a Cognito user pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoConfig {
    region: String,
    pool_id: String,
}

impl CognitoConfig {
    /// Validate and build the configuration
    ///
    /// Both values are trimmed. Missing values are reported together so the
    /// operator can fix them in one go.
    pub fn new(region: impl Into<String>, pool_id: impl Into<String>) -> Result<Self> {
        let region = region.into().trim().to_string();
        let pool_id = pool_id.into().trim().to_string();

        let missing: Vec<&str> = [("region", &region), ("pool_id", &pool_id)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            return Err(Error::ConfigurationInvalid(format!(
                "missing required setting: {}",
                missing.join(", ")
            )));
        }

        for (name, value) in [("region", &region), ("pool_id", &pool_id)] {
            if value.contains(|c: char| c == '/' || c.is_whitespace()) {
                return Err(Error::ConfigurationInvalid(format!(
                    "{name} must not contain '/' or whitespace: '{value}'"
                )));
            }
        }

        Ok(Self { region, pool_id })
    }

    /// Load from a flat settings map using the `region` and `pool_id` keys
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| settings.get(key).cloned().unwrap_or_default();
        Self::new(get("region"), get("pool_id"))
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn pool_id(&self) -> &str {
        &self.pool_id
    }

    /// The user pool's well-known JWKS URL
    pub fn jwks_uri(&self) -> Result<String> {
        let uri = format!(
            "https://cognito-idp.{}.amazonaws.com/{}/.well-known/jwks.json",
            self.region, self.pool_id
        );
        validate_jwks_uri(&uri)?;
        Ok(uri)
    }
}

/// PEM document type produced for each key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PemFormat {
    /// `-----BEGIN PUBLIC KEY-----` (SubjectPublicKeyInfo)
    #[default]
    Spki,
    /// `-----BEGIN RSA PUBLIC KEY-----` (PKCS#1 RSAPublicKey)
    Pkcs1,
}

/// Options controlling key conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub(crate) include_der: bool,
    pub(crate) pem_format: PemFormat,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also export the hex-encoded PKCS#1 DER for every key
    pub fn include_der(mut self, include: bool) -> Self {
        self.include_der = include;
        self
    }

    /// Select the PEM document type
    pub fn pem_format(mut self, format: PemFormat) -> Self {
        self.pem_format = format;
        self
    }

    pub fn includes_der(&self) -> bool {
        self.include_der
    }

    pub fn format(&self) -> PemFormat {
        self.pem_format
    }
}
