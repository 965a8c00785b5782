use std::fmt;

/// Stable key length (PBKDF2 output, AEAD key).
pub const KEY_LEN_32: usize = 32;

/// Standard 12-byte nonce length for AES-GCM and ChaCha20-Poly1305.
pub const NONCE_LEN_12: usize = 12;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

/// Image seed length (SHA-256 digest).
pub const SEED_LEN: usize = 32;

#[derive(Debug)]
pub enum CryptoError {
    /// The pixel buffer was empty; no seed can be derived.
    EmptySeedInput,

    /// Salt is all zeros.
    InvalidSalt,

    /// Invalid key length provided to cipher.
    InvalidKeyLen { expected: usize, actual: usize },

    /// Ciphertext shorter than the AEAD tag.
    CiphertextTooShort { have: usize, need: usize },

    /// Stored key fingerprint does not match the re-derived key.
    FingerprintMismatch,

    /// AEAD tag mismatch (authentication failure).
    TagMismatch,

    /// General derivation or runtime error with context.
    Failure(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CryptoError::*;
        match self {
            EmptySeedInput =>
                write!(f, "cannot derive image seed from an empty pixel buffer"),
            InvalidSalt =>
                write!(f, "invalid salt: all zeros"),
            InvalidKeyLen { expected, actual } =>
                write!(f, "invalid key length: expected={}, actual={}", expected, actual),
            CiphertextTooShort { have, need } =>
                write!(f, "ciphertext too short: {} < {}", have, need),
            FingerprintMismatch =>
                write!(f, "key fingerprint mismatch"),
            TagMismatch =>
                write!(f, "AEAD tag mismatch"),
            Failure(msg) =>
                write!(f, "crypto failure: {}", msg),
        }
    }
}

impl std::error::Error for CryptoError {}
