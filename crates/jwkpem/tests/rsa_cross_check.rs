//! Cross-check PEM/DER output against the `rsa` crate
//!
//! A freshly generated key is exported to a JWK and converted; the result
//! must match what `rsa` produces for the same public key.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jwkpem::{convert_jwk, ConvertOptions, Jwk, PemFormat};
use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

fn generate_public_key() -> RsaPublicKey {
    let mut rng = rand::thread_rng();
    RsaPrivateKey::new(&mut rng, 2048)
        .expect("failed to generate RSA key")
        .to_public_key()
}

fn to_jwk(kid: &str, key: &RsaPublicKey) -> Jwk {
    Jwk {
        alg: Some("RS256".into()),
        key_use: Some("sig".into()),
        ..Jwk::rsa(
            kid,
            URL_SAFE_NO_PAD.encode(key.n().to_bytes_be()),
            URL_SAFE_NO_PAD.encode(key.e().to_bytes_be()),
        )
    }
}

#[test]
fn generated_key_round_trips_through_jwk() {
    let public_key = generate_public_key();
    let jwk = to_jwk("generated", &public_key);

    let spki = convert_jwk(&jwk, &ConvertOptions::new().include_der(true)).expect("convert");
    let expected_spki = public_key
        .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
        .expect("encode spki pem");
    assert_eq!(spki.pem.trim_end(), expected_spki.trim_end());

    let expected_der = public_key.to_pkcs1_der().expect("encode pkcs1 der");
    assert_eq!(spki.der_bytes().as_deref(), Some(expected_der.as_bytes()));

    let pkcs1 = convert_jwk(&jwk, &ConvertOptions::new().pem_format(PemFormat::Pkcs1))
        .expect("convert");
    let expected_pkcs1 = public_key
        .to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
        .expect("encode pkcs1 pem");
    assert_eq!(pkcs1.pem.trim_end(), expected_pkcs1.trim_end());
}
