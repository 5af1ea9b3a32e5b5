//! JWK (JSON Web Key) and JWK Set structures

use crate::error::ConversionErrorKind;
use crate::limits::{MAX_JWK_ALG_SIZE, MAX_JWK_E_SIZE, MAX_JWK_KID_SIZE, MAX_JWK_N_SIZE};
use crate::utils::base64url;
use miniserde::json::Value;
use miniserde::Deserialize;

/// JSON Web Key (JWK) record as published in a key set
///
/// Every member is optional on the wire; the codec decides which ones are
/// required for a given key type. Unknown members are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Jwk {
    /// Key type (e.g., "RSA")
    pub kty: Option<String>,
    /// Key ID
    pub kid: Option<String>,
    /// Algorithm (advisory, copied through)
    pub alg: Option<String>,
    /// Key use (RFC 7517 Section 4.2), the `use` member
    pub key_use: Option<String>,
    /// RSA modulus (Base64URL-encoded)
    pub n: Option<String>,
    /// RSA exponent (Base64URL-encoded)
    pub e: Option<String>,
    /// Elliptic curve name
    pub crv: Option<String>,
    /// EC x-coordinate (Base64URL-encoded)
    pub x: Option<String>,
    /// EC y-coordinate (Base64URL-encoded)
    pub y: Option<String>,
    /// Why the record could not be read as a JWK, if it could not
    ///
    /// Set when the record is not a JSON object or a known member is not a
    /// string. Such a record always fails conversion.
    pub malformed: Option<String>,
}

/// JSON Web Key Set (JWKS)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JwkSet {
    /// The keys in the set
    pub keys: Vec<Jwk>,
}

#[derive(Deserialize)]
struct RawJwkSet {
    keys: Vec<Value>,
}

impl JwkSet {
    /// Parse a JWKS document
    ///
    /// Fails only when the document is not a JSON object with a `keys` array.
    /// Each element of `keys` is read on its own, so one bad record never
    /// hides its siblings.
    pub fn from_json(json: &str) -> miniserde::Result<Self> {
        let raw: RawJwkSet = miniserde::json::from_str(json)?;
        Ok(Self {
            keys: raw.keys.iter().map(Jwk::from_value).collect(),
        })
    }
}

impl Jwk {
    /// Build an RSA JWK from already Base64URL-encoded components
    pub fn rsa(kid: impl Into<String>, n: impl Into<String>, e: impl Into<String>) -> Self {
        Self {
            kty: Some("RSA".into()),
            kid: Some(kid.into()),
            n: Some(n.into()),
            e: Some(e.into()),
            ..<Self as Default>::default()
        }
    }

    /// Read one element of a key set's `keys` array
    ///
    /// Never fails. Problems are recorded in [`Jwk::malformed`] and every
    /// member that is a string is still kept, `kid` included.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(members) = value else {
            return Self {
                malformed: Some("record is not a json object".into()),
                ..<Self as Default>::default()
            };
        };

        let mut jwk = <Self as Default>::default();
        let mut malformed = None;

        let fields = [
            ("kty", &mut jwk.kty),
            ("kid", &mut jwk.kid),
            ("alg", &mut jwk.alg),
            ("use", &mut jwk.key_use),
            ("n", &mut jwk.n),
            ("e", &mut jwk.e),
            ("crv", &mut jwk.crv),
            ("x", &mut jwk.x),
            ("y", &mut jwk.y),
        ];

        for (name, slot) in fields {
            match members.get(name) {
                None | Some(Value::Null) => {}
                Some(Value::String(value)) => *slot = Some(value.clone()),
                Some(_) => {
                    malformed.get_or_insert_with(|| format!("member '{name}' is not a string"));
                }
            }
        }

        jwk.malformed = malformed;
        jwk
    }

    /// Reject members that exceed their size limits before anything is decoded
    pub(crate) fn validate_field_sizes(&self) -> Result<(), ConversionErrorKind> {
        let fields = [
            ("kid", &self.kid, MAX_JWK_KID_SIZE),
            ("alg", &self.alg, MAX_JWK_ALG_SIZE),
            ("n", &self.n, MAX_JWK_N_SIZE),
            ("e", &self.e, MAX_JWK_E_SIZE),
        ];

        for (field, value, max) in fields {
            if let Some(value) = value {
                if value.len() > max {
                    return Err(ConversionErrorKind::MalformedKeyMaterial(format!(
                        "field '{field}' too large: {} bytes (maximum: {max} bytes)",
                        value.len()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Decode the RSA modulus and exponent to big-endian bytes
    pub(crate) fn rsa_components(&self) -> Result<(Vec<u8>, Vec<u8>), ConversionErrorKind> {
        // Base64URL: 4 chars → 3 bytes, so max_decoded = (max_encoded * 3) / 4
        const MAX_DECODED_JWK_N: usize = (MAX_JWK_N_SIZE * 3) / 4;
        const MAX_DECODED_JWK_E: usize = (MAX_JWK_E_SIZE * 3) / 4;

        let n = required(&self.n, "rsa key missing n (modulus)")?;
        let e = required(&self.e, "rsa key missing e (exponent)")?;

        let n_bytes = base64url::decode_bytes("n", n, MAX_DECODED_JWK_N)?;
        let e_bytes = base64url::decode_bytes("e", e, MAX_DECODED_JWK_E)?;

        Ok((n_bytes, e_bytes))
    }
}

fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, ConversionErrorKind> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConversionErrorKind::MalformedKeyMaterial(message.into()))
}
