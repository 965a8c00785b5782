//! crypto/aead.rs
//! AEAD interface for ChaCha20-Poly1305 and AES-256-GCM.
//!
//! Design notes:
//! - Both ciphers use 32-byte keys and 12-byte nonces.
//! - Tag verification must fail closed (no partial plaintext).
//! - Cipher selection is driven by the envelope version.

use aes_gcm::aead::{Aead, KeyInit, Payload};

use aes_gcm::{Aes256Gcm, Nonce as AesNonce};
use chacha20poly1305::{ChaCha20Poly1305, Nonce as ChaNonce};

use crate::crypto::types::{CryptoError, KEY_LEN_32, NONCE_LEN_12, TAG_LEN};
use crate::headers::EnvelopeVersion;

/// Unified AEAD cipher implementation selected by the envelope version.
#[derive(Clone)]
pub enum AeadImpl {
    AesGcm(Aes256Gcm),
    ChaCha(ChaCha20Poly1305),
}

impl AeadImpl {
    /// Construct the AEAD for `version` keyed with `key`.
    pub fn from_version_and_key(version: EnvelopeVersion, key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != KEY_LEN_32 {
            return Err(CryptoError::InvalidKeyLen {
                expected: KEY_LEN_32,
                actual: key.len(),
            });
        }

        match version {
            EnvelopeVersion::V1ChaCha20Poly1305 => {
                let cipher = ChaCha20Poly1305::new_from_slice(key)
                    .map_err(|_| CryptoError::InvalidKeyLen {
                        expected: KEY_LEN_32,
                        actual: key.len(),
                    })?;
                Ok(Self::ChaCha(cipher))
            }
            EnvelopeVersion::V2Aes256Gcm => {
                let cipher = Aes256Gcm::new_from_slice(key)
                    .map_err(|_| CryptoError::InvalidKeyLen {
                        expected: KEY_LEN_32,
                        actual: key.len(),
                    })?;
                Ok(Self::AesGcm(cipher))
            }
        }
    }

    /// AEAD seal (encrypt) plaintext with nonce and AAD.
    /// An empty plaintext is allowed: the output is then just the tag.
    pub fn seal(
        &self,
        nonce_12: &[u8; NONCE_LEN_12],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        match self {
            AeadImpl::AesGcm(cipher) => cipher
                .encrypt(AesNonce::from_slice(nonce_12), Payload { msg: plaintext, aad })
                .map_err(|_| CryptoError::Failure("AES-GCM seal failed".into())),
            AeadImpl::ChaCha(cipher) => cipher
                .encrypt(ChaNonce::from_slice(nonce_12), Payload { msg: plaintext, aad })
                .map_err(|_| CryptoError::Failure("ChaCha20-Poly1305 seal failed".into())),
        }
    }

    /// AEAD open (decrypt) ciphertext with nonce and AAD.
    pub fn open(
        &self,
        nonce_12: &[u8; NONCE_LEN_12],
        aad: &[u8],
        ciphertext_and_tag: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        if ciphertext_and_tag.len() < TAG_LEN {
            return Err(CryptoError::CiphertextTooShort {
                have: ciphertext_and_tag.len(),
                need: TAG_LEN,
            });
        }

        match self {
            AeadImpl::AesGcm(cipher) => cipher
                .decrypt(AesNonce::from_slice(nonce_12), Payload { msg: ciphertext_and_tag, aad })
                .map_err(|_| CryptoError::TagMismatch),
            AeadImpl::ChaCha(cipher) => cipher
                .decrypt(ChaNonce::from_slice(nonce_12), Payload { msg: ciphertext_and_tag, aad })
                .map_err(|_| CryptoError::TagMismatch),
        }
    }
}
