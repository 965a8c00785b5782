//! headers/types.rs
//! Envelope header struct, version registry and header errors.
//!
//! Layout (66 bytes, big-endian):
//! - 0..6    signature ("CELFIE")
//! - 6..10   version
//! - 10..42  key_material (key fingerprint)
//! - 42..58  salt
//! - 58..66  data_length (ciphertext bytes that follow)

use std::fmt;
use num_enum::TryFromPrimitive;

use crate::constants::{
    version_ids, HEADER_LEN, KEY_MATERIAL_LEN, SALT_LEN, SIGNATURE, SIGNATURE_LEN,
};

/// Envelope versions. Each version pins the AEAD used for the ciphertext.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum EnvelopeVersion {
    V1ChaCha20Poly1305 = version_ids::V1_CHACHA20_POLY1305,
    V2Aes256Gcm        = version_ids::V2_AES256_GCM,
}

impl EnvelopeVersion {
    pub fn verify(raw: u32) -> Result<Self, HeaderError> {
        Self::try_from_primitive(raw).map_err(|_| HeaderError::UnsupportedVersion { have: raw })
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl Default for EnvelopeVersion {
    fn default() -> Self {
        EnvelopeVersion::V1ChaCha20Poly1305
    }
}

/// Decoded envelope header.
/// - `key_material` carries the fingerprint of the derived key, not the key.
/// - `salt` is random per encode and feeds the key derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeHeader {
    pub signature: [u8; SIGNATURE_LEN],
    pub version: u32,
    pub key_material: [u8; KEY_MATERIAL_LEN],
    pub salt: [u8; SALT_LEN],
    pub data_length: u64,
}

impl EnvelopeHeader {
    pub const LEN: usize = HEADER_LEN;

    pub fn new(
        version: EnvelopeVersion,
        key_material: [u8; KEY_MATERIAL_LEN],
        salt: [u8; SALT_LEN],
        data_length: u64,
    ) -> Self {
        Self {
            signature: SIGNATURE,
            version: version.as_u32(),
            key_material,
            salt,
            data_length,
        }
    }

    /// Canonical header for tests.
    /// Guaranteed to pass `validate()` unless a regression is introduced.
    pub fn test_header() -> Self {
        Self::new(EnvelopeVersion::V1ChaCha20Poly1305, [0x5A; KEY_MATERIAL_LEN], [0xA5; SALT_LEN], 42)
    }

    /// Typed view of the version field. Fails on unknown versions.
    pub fn envelope_version(&self) -> Result<EnvelopeVersion, HeaderError> {
        EnvelopeVersion::verify(self.version)
    }

    /// Ordered checks: signature first, then version, then salt.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.signature != SIGNATURE {
            return Err(HeaderError::InvalidSignature {
                have: self.signature,
                need: SIGNATURE,
            });
        }

        EnvelopeVersion::verify(self.version)?;

        if self.salt.iter().all(|&b| b == 0) {
            return Err(HeaderError::InvalidSalt { salt: self.salt });
        }

        Ok(())
    }
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

#[derive(Debug)]
pub enum HeaderError {
    /// Buffer too short to contain a header.
    BufferTooShort { have: usize, need: usize },

    /// Signature bytes are not "CELFIE".
    InvalidSignature { have: [u8; SIGNATURE_LEN], need: [u8; SIGNATURE_LEN] },

    /// Unknown envelope version.
    UnsupportedVersion { have: u32 },

    /// Salt is invalid (all zeros).
    InvalidSalt { salt: [u8; SALT_LEN] },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use HeaderError::*;
        match self {
            BufferTooShort { have, need } =>
                write!(f, "header buffer too short: {} < {}", have, need),
            InvalidSignature { have, need } =>
                write!(f, "invalid signature: expected {}, got {}", fmt_bytes(need), fmt_bytes(have)),
            UnsupportedVersion { have } =>
                write!(f, "unsupported version: {}",
                    enum_name_or_hex::<EnvelopeVersion>(*have)),
            InvalidSalt { salt } =>
                write!(f, "invalid salt: all zeros ({})", fmt_bytes(salt)),
        }
    }
}

impl std::error::Error for HeaderError {}
