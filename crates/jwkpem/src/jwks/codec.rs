//! Conversion of a single JWK into its PEM (and optionally DER) encoding
//!
//! Conversion is a pure transform: no I/O, no logging. Identical input yields
//! byte-identical output.

use crate::config::{ConvertOptions, PemFormat};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::jwks::jwk::Jwk;
use crate::utils::der::{
    rsa_pkcs1_from_n_e, rsa_spki_from_pkcs1, to_pem, PKCS1_PEM_LABEL, SPKI_PEM_LABEL,
};
use miniserde::Serialize;

const RSA_KEY_TYPE: &str = "RSA";

/// A JWK rendered in the encodings a JWT verifier consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedKey {
    /// Key ID, always equal to the source JWK's `kid`
    pub kid: String,
    /// PEM-encoded public key
    pub pem: String,
    /// Lowercase hex of the PKCS#1 RSAPublicKey DER, when requested
    pub der: Option<String>,
    /// Algorithm copied from the JWK
    pub alg: Option<String>,
    /// Key type copied from the JWK
    pub kty: String,
}

impl ConvertedKey {
    /// Raw PKCS#1 DER bytes, when DER export was enabled
    pub fn der_bytes(&self) -> Option<Vec<u8>> {
        self.der.as_deref().and_then(|der| hex::decode(der).ok())
    }
}

/// Convert one JWK record
///
/// Only RSA public keys are supported; any other `kty` fails with
/// [`ConversionErrorKind::UnsupportedKeyType`].
pub fn convert(jwk: &Jwk, options: &ConvertOptions) -> Result<ConvertedKey, ConversionError> {
    convert_inner(jwk, options).map_err(|kind| ConversionError::new(jwk.kid.clone(), kind))
}

fn convert_inner(jwk: &Jwk, options: &ConvertOptions) -> Result<ConvertedKey, ConversionErrorKind> {
    if let Some(reason) = &jwk.malformed {
        return Err(ConversionErrorKind::MalformedKeyMaterial(reason.clone()));
    }

    match jwk.kty.as_deref() {
        Some(RSA_KEY_TYPE) => {}
        Some(other) => return Err(ConversionErrorKind::UnsupportedKeyType(other.to_string())),
        None => return Err(ConversionErrorKind::UnsupportedKeyType("missing kty".into())),
    }

    jwk.validate_field_sizes()?;

    let kid = jwk
        .kid
        .as_deref()
        .filter(|kid| !kid.is_empty())
        .ok_or_else(|| ConversionErrorKind::MalformedKeyMaterial("missing kid".into()))?;

    let (n, e) = jwk.rsa_components()?;
    let pkcs1 = rsa_pkcs1_from_n_e(&n, &e)?;

    let pem = match options.pem_format {
        PemFormat::Spki => to_pem(SPKI_PEM_LABEL, &rsa_spki_from_pkcs1(&pkcs1)?)?,
        PemFormat::Pkcs1 => to_pem(PKCS1_PEM_LABEL, &pkcs1)?,
    };

    Ok(ConvertedKey {
        kid: kid.to_string(),
        pem,
        der: options.include_der.then(|| hex::encode(&pkcs1)),
        alg: jwk.alg.clone(),
        kty: RSA_KEY_TYPE.to_string(),
    })
}
