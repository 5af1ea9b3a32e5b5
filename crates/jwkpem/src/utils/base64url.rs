//! Base64URL decoding per RFC 4648
//!
//! Thin wrapper around the `base64` crate with size limit validation.

use crate::error::ConversionErrorKind;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Decode a Base64URL JWK member to bytes with maximum size limit
///
/// Trailing `=` padding is tolerated; some providers emit it despite RFC 7518.
pub(crate) fn decode_bytes(
    field: &str,
    input: &str,
    max_size: usize,
) -> Result<Vec<u8>, ConversionErrorKind> {
    let result = URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .map_err(|e| {
            ConversionErrorKind::MalformedKeyMaterial(format!("failed to decode {field}: {e}"))
        })?;

    if result.len() > max_size {
        return Err(ConversionErrorKind::MalformedKeyMaterial(format!(
            "decoded {field} exceeds limit: {} bytes (max: {max_size})",
            result.len()
        )));
    }

    Ok(result)
}
