//! Size limit constants for input validation

/// Maximum length for JWKS URIs (2048 characters)
pub(crate) const MAX_JWKS_URI_LENGTH: usize = 2048;

/// Maximum size for JWKS response (512KB)
pub(crate) const MAX_JWKS_RESPONSE_SIZE: usize = 512 * 1024;

/// Maximum number of keys in a JWK set (100 keys)
pub(crate) const MAX_JWK_SET_SIZE: usize = 100;

// ============================================================================
// JWK field size limits
// ============================================================================

/// Maximum size for Base64URL-encoded RSA modulus (n) field (12KB)
/// 8192-byte modulus (65536 bits) encodes to ~10.9KB Base64URL
pub(crate) const MAX_JWK_N_SIZE: usize = 12 * 1024;

/// Maximum size for Base64URL-encoded RSA exponent (e) field (64 bytes)
pub(crate) const MAX_JWK_E_SIZE: usize = 64;

/// Maximum size for JWK key ID (kid) field (256 bytes)
pub(crate) const MAX_JWK_KID_SIZE: usize = 256;

/// Maximum size for JWK algorithm (alg) field (16 bytes)
pub(crate) const MAX_JWK_ALG_SIZE: usize = 16;

/// Maximum decoded RSA modulus (8192 bytes, 65536 bits)
pub(crate) const MAX_RSA_MODULUS_SIZE: usize = 8192;
