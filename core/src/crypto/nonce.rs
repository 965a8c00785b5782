//! crypto/nonce.rs
//! Deterministic nonce derivation for the single AEAD call of an envelope.
//!
//! Design:
//! - HKDF-SHA256(salt, key) expanded under a nonce label -> 12 bytes.
//!
//! Security notes:
//! - Every encode draws a fresh random salt, so every key seals exactly one
//!   message and a key-derived nonce is never reused under the same key.
//! - Do not use all-zero salts. Validate before deriving.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::constants::{HKDF_INFO_NONCE, SALT_LEN};
use crate::crypto::types::{CryptoError, KEY_LEN_32, NONCE_LEN_12};

/// Derive the 12-byte AEAD nonce bound to `(key, salt)`.
#[inline]
pub fn derive_nonce_12(
    key: &[u8; KEY_LEN_32],
    salt: &[u8; SALT_LEN],
) -> Result<[u8; NONCE_LEN_12], CryptoError> {
    validate_salt(salt)?;

    let hk = Hkdf::<Sha256>::new(Some(salt), key);
    let mut nonce = [0u8; NONCE_LEN_12];
    hk.expand(HKDF_INFO_NONCE, &mut nonce)
        .map_err(|_| CryptoError::Failure("HKDF expand failed (nonce)".into()))?;
    Ok(nonce)
}

/// Summary: Validate that salt is not all zeros.
#[inline]
pub fn validate_salt(salt: &[u8; SALT_LEN]) -> Result<(), CryptoError> {
    if salt.iter().all(|&b| b == 0) {
        return Err(CryptoError::InvalidSalt);
    }
    Ok(())
}
