use std::fmt;

use thiserror::Error;

use crate::{
    compression::CompressionError,
    crypto::CryptoError,
    headers::{fmt_bytes, HeaderError},
};

/// Unified error covering every stage of encode and decode.
/// - Layer errors (header, crypto, compression) convert via `From`, so `?`
///   works across the pipeline and the caller sees one taxonomy.
/// - Every variant is terminal for the current call.
#[derive(Debug, Error)]
pub enum StegoError {
    /// Bad seed, shape, or bit sequence supplied by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The pixel buffer cannot hold the envelope.
    #[error("insufficient capacity: need {required_bits} bits, have {available_bits}")]
    InsufficientCapacity { required_bits: usize, available_bits: usize },

    /// Bit packer asked to read or write past the end of the buffer.
    #[error("capacity exceeded: requested {requested} samples, {remaining} remaining")]
    CapacityExceeded { requested: usize, remaining: usize },

    /// Extracted signature is not the Celfie magic.
    #[error("invalid signature: got {}", fmt_bytes(.found))]
    InvalidSignature { found: [u8; 6] },

    /// Signature matched but the layout version is unknown.
    #[error("unsupported envelope version: {version}")]
    UnsupportedVersion { version: u32 },

    /// AEAD authentication or key fingerprint check failed.
    #[error("payload tampered with or wrong key")]
    TamperedOrWrongKey,

    /// Decompression, framing, length or delimiter failure.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),
}

impl From<HeaderError> for StegoError {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::InvalidSignature { have, .. } => StegoError::InvalidSignature { found: have },
            HeaderError::UnsupportedVersion { have } => StegoError::UnsupportedVersion { version: have },
            other => StegoError::CorruptPayload(other.to_string()),
        }
    }
}

impl From<CryptoError> for StegoError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::TagMismatch | CryptoError::FingerprintMismatch => StegoError::TamperedOrWrongKey,
            CryptoError::EmptySeedInput | CryptoError::InvalidSalt => StegoError::InvalidInput(e.to_string()),
            other => StegoError::CorruptPayload(other.to_string()),
        }
    }
}

impl From<CompressionError> for StegoError {
    fn from(e: CompressionError) -> Self {
        match e {
            CompressionError::InvalidLevel { .. } => StegoError::InvalidInput(e.to_string()),
            other => StegoError::CorruptPayload(other.to_string()),
        }
    }
}

/// Shape of a flat, row-major sample buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelShape {
    pub width: u32,
    pub height: u32,
    /// Samples per pixel (1 = gray, 3 = RGB, 4 = RGBA).
    pub channels: u8,
}

impl PixelShape {
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        Self { width, height, channels }
    }

    pub fn rgb(width: u32, height: u32) -> Self {
        Self::new(width, height, 3)
    }

    /// Total number of byte samples (`width * height * channels`).
    /// `None` when the product overflows `usize`.
    pub fn sample_count(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.channels as usize)
    }

    /// Checks the shape itself and that `buffer_len` matches it.
    pub fn validate(&self, buffer_len: usize) -> Result<usize, StegoError> {
        if self.width == 0 || self.height == 0 {
            return Err(StegoError::InvalidInput(format!(
                "image dimensions must be non-zero, got {}", self
            )));
        }
        if !(1..=4).contains(&self.channels) {
            return Err(StegoError::InvalidInput(format!(
                "channel count must be 1..=4, got {}", self.channels
            )));
        }
        let expected = self
            .sample_count()
            .ok_or_else(|| StegoError::InvalidInput(format!("shape {} overflows", self)))?;
        if expected != buffer_len {
            return Err(StegoError::InvalidInput(format!(
                "buffer holds {} samples but shape {} needs {}",
                buffer_len, self, expected
            )));
        }
        Ok(expected)
    }
}

impl fmt::Display for PixelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}
