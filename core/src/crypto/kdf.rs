//! crypto/kdf.rs
//! Key derivation from the image seed and the per-encode salt.
//!
//! Design:
//! - PBKDF2-HMAC-SHA256(APP_SECRET || image_seed, salt, 100 000) -> 32-byte key.
//! - HKDF-SHA256(salt, key) expanded under a fingerprint label -> key_material.
//!
//! Notes:
//! - No key is ever stored: decode re-derives it from the image content and
//!   the salt carried in the header.
//! - The fingerprint lets decode reject a wrong key before touching the AEAD.
//!   Comparison is constant-time.

use std::num::NonZeroU32;

use hkdf::Hkdf;
use ring::pbkdf2;
use sha2::Sha256;

use crate::constants::{APP_SECRET, HKDF_INFO_FINGERPRINT, KDF_ITERATIONS, KEY_MATERIAL_LEN, SALT_LEN};
use crate::crypto::nonce::validate_salt;
use crate::crypto::types::{CryptoError, KEY_LEN_32, SEED_LEN};

/// Derive the 32-byte symmetric key for one envelope.
///
/// Deterministic: the same `(image_seed, salt)` always yields the same key.
///
/// Errors:
/// - `InvalidSalt` for an all-zero salt.
pub fn derive_key(
    image_seed: &[u8; SEED_LEN],
    salt: &[u8; SALT_LEN],
) -> Result<[u8; KEY_LEN_32], CryptoError> {
    validate_salt(salt)?;

    let iterations = NonZeroU32::new(KDF_ITERATIONS)
        .ok_or_else(|| CryptoError::Failure("KDF iteration count must be non-zero".into()))?;

    let mut secret = Vec::with_capacity(APP_SECRET.len() + SEED_LEN);
    secret.extend_from_slice(APP_SECRET);
    secret.extend_from_slice(image_seed);

    let mut key = [0u8; KEY_LEN_32];
    pbkdf2::derive(pbkdf2::PBKDF2_HMAC_SHA256, iterations, salt, &secret, &mut key);
    Ok(key)
}

/// Fingerprint of a derived key, stored in the header as `key_material`.
pub fn key_fingerprint(
    key: &[u8; KEY_LEN_32],
    salt: &[u8; SALT_LEN],
) -> Result<[u8; KEY_MATERIAL_LEN], CryptoError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), key);
    let mut fp = [0u8; KEY_MATERIAL_LEN];
    hk.expand(HKDF_INFO_FINGERPRINT, &mut fp)
        .map_err(|_| CryptoError::Failure("HKDF expand failed (fingerprint)".into()))?;
    Ok(fp)
}

/// Re-derive the fingerprint and compare it with the stored `key_material`.
pub fn verify_fingerprint(
    key: &[u8; KEY_LEN_32],
    salt: &[u8; SALT_LEN],
    stored: &[u8; KEY_MATERIAL_LEN],
) -> Result<(), CryptoError> {
    let expected = key_fingerprint(key, salt)?;
    let diff = expected
        .iter()
        .zip(stored.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));
    if diff != 0 {
        return Err(CryptoError::FingerprintMismatch);
    }
    Ok(())
}
