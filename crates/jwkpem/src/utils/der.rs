//! DER and PEM encoding of RSA public keys
//!
//! This module uses the RustCrypto `spki` and `der` crates for standards-compliant
//! DER encoding, and the PEM support `der` re-exports from `pem-rfc7468`.

use crate::error::ConversionErrorKind;
use crate::limits::MAX_RSA_MODULUS_SIZE;
use der::asn1::{BitString, UintRef};
use der::pem::LineEnding;
use der::{Encode, Sequence};
use spki::{AlgorithmIdentifierOwned, ObjectIdentifier, SubjectPublicKeyInfoOwned};

/// PEM label for a SubjectPublicKeyInfo document
pub(crate) const SPKI_PEM_LABEL: &str = "PUBLIC KEY";

/// PEM label for a PKCS#1 RSAPublicKey document
pub(crate) const PKCS1_PEM_LABEL: &str = "RSA PUBLIC KEY";

const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

fn encoding_error(operation: &str, details: impl std::fmt::Display) -> ConversionErrorKind {
    ConversionErrorKind::MalformedKeyMaterial(format!("{operation}: {details}"))
}

/// RSA public key structure for DER encoding
///
/// Represents RSAPublicKey as defined in RFC 8017:
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// Build the PKCS#1 RSAPublicKey DER from big-endian modulus and exponent bytes
pub(crate) fn rsa_pkcs1_from_n_e(n: &[u8], e: &[u8]) -> Result<Vec<u8>, ConversionErrorKind> {
    if n.iter().all(|b| *b == 0) {
        return Err(encoding_error("rsa key", "modulus is empty or zero"));
    }
    if e.iter().all(|b| *b == 0) {
        return Err(encoding_error("rsa key", "exponent is empty or zero"));
    }

    if n.len() > MAX_RSA_MODULUS_SIZE {
        return Err(encoding_error(
            "RSA modulus too large",
            format!("{} bytes (maximum: {MAX_RSA_MODULUS_SIZE} bytes)", n.len()),
        ));
    }

    // UintRef strips leading zeros and re-adds one when the high bit is set
    let rsa_pubkey = RsaPublicKey {
        modulus: UintRef::new(n).map_err(|e| encoding_error("failed to encode RSA modulus", e))?,
        public_exponent: UintRef::new(e)
            .map_err(|e| encoding_error("failed to encode RSA exponent", e))?,
    };

    rsa_pubkey
        .to_der()
        .map_err(|e| encoding_error("failed to encode RSA public key", e))
}

/// Wrap a PKCS#1 RSAPublicKey in a SubjectPublicKeyInfo with the rsaEncryption OID
pub(crate) fn rsa_spki_from_pkcs1(pkcs1: &[u8]) -> Result<Vec<u8>, ConversionErrorKind> {
    let algorithm = AlgorithmIdentifierOwned {
        oid: RSA_ENCRYPTION_OID,
        parameters: Some(der::asn1::AnyRef::NULL.into()),
    };

    let subject_public_key = BitString::new(0, pkcs1.to_vec())
        .map_err(|e| encoding_error("failed to create bit string", e))?;

    SubjectPublicKeyInfoOwned {
        algorithm,
        subject_public_key,
    }
    .to_der()
    .map_err(|e| encoding_error("failed to encode SPKI", e))
}

/// Armour DER bytes as PEM with LF line endings
pub(crate) fn to_pem(label: &str, der_bytes: &[u8]) -> Result<String, ConversionErrorKind> {
    der::pem::encode_string(label, LineEnding::LF, der_bytes)
        .map_err(|e| encoding_error("failed to encode PEM", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const E_65537: [u8; 3] = [0x01, 0x00, 0x01];

    #[test]
    fn test_rsa_pkcs1_from_n_e() {
        let der = rsa_pkcs1_from_n_e(&[0x00, 0x01], &E_65537).expect("should encode");
        // SEQUENCE { INTEGER 1, INTEGER 65537 }
        assert_eq!(
            der,
            vec![0x30, 0x08, 0x02, 0x01, 0x01, 0x02, 0x03, 0x01, 0x00, 0x01]
        );
    }

    #[test]
    fn test_rsa_pkcs1_high_bit_gets_sign_byte() {
        let der = rsa_pkcs1_from_n_e(&[0x80], &E_65537).expect("should encode");
        assert_eq!(&der[2..6], &[0x02, 0x02, 0x00, 0x80]);
    }

    #[test]
    fn test_rsa_pkcs1_empty_or_zero_n() {
        assert!(rsa_pkcs1_from_n_e(&[], &E_65537).is_err());
        assert!(rsa_pkcs1_from_n_e(&[0x00, 0x00], &E_65537).is_err());
    }

    #[test]
    fn test_rsa_pkcs1_empty_e() {
        assert!(rsa_pkcs1_from_n_e(&[0x01], &[]).is_err());
    }

    #[test]
    fn test_rsa_pkcs1_large_modulus_rejected() {
        let n = vec![0x01; MAX_RSA_MODULUS_SIZE + 1];
        let result = rsa_pkcs1_from_n_e(&n, &E_65537);
        assert!(
            matches!(result, Err(ConversionErrorKind::MalformedKeyMaterial(msg)) if msg.contains("RSA modulus too large"))
        );
    }

    #[test]
    fn test_rsa_spki_proper_length_encoding() {
        // 256-byte modulus simulates a 2048-bit RSA key (requires 2-byte length)
        let mut n = vec![0x00; 256];
        n[0] = 0xc1;
        let pkcs1 = rsa_pkcs1_from_n_e(&n, &E_65537).expect("pkcs1");
        let spki = rsa_spki_from_pkcs1(&pkcs1).expect("spki");

        assert_eq!(spki[0], 0x30);
        assert_eq!(spki[1], 0x82);
        // Fixed AlgorithmIdentifier prefix for rsaEncryption with NULL parameters
        assert_eq!(
            &spki[4..19],
            &[
                0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01,
                0x05, 0x00
            ]
        );
        assert!(spki.ends_with(&pkcs1));
    }

    #[test]
    fn test_to_pem_framing() {
        let pem = to_pem(SPKI_PEM_LABEL, &[0u8; 100]).expect("pem");
        let lines: Vec<&str> = pem.lines().collect();
        assert_eq!(lines.first(), Some(&"-----BEGIN PUBLIC KEY-----"));
        assert_eq!(lines.last(), Some(&"-----END PUBLIC KEY-----"));
        assert!(lines[1..lines.len() - 1].iter().all(|l| l.len() <= 64));
        assert!(!pem.contains('\r'));
    }
}
