//! capacity.rs
//! Capacity planning: does an envelope fit a sample buffer?
//!
//! One sample carries one bit, so an envelope of `n` bytes needs `8 * n`
//! samples. The check runs before the first write; encode is all-or-nothing.

use serde::{Deserialize, Serialize};

use crate::constants::{DELIMITER_LEN, HEADER_LEN};
use crate::crypto::TAG_LEN;
use crate::types::StegoError;

/// Samples (bits) needed to embed an envelope of `envelope_byte_len` bytes.
#[inline]
pub fn required_bits(envelope_byte_len: usize) -> Result<usize, StegoError> {
    envelope_byte_len.checked_mul(8).ok_or_else(|| {
        StegoError::InvalidInput(format!("envelope of {} bytes is too large", envelope_byte_len))
    })
}

/// Fail with `InsufficientCapacity` unless `envelope_bit_length` samples fit.
pub fn check_capacity(buffer_length_samples: usize, envelope_bit_length: usize) -> Result<(), StegoError> {
    if envelope_bit_length > buffer_length_samples {
        return Err(StegoError::InsufficientCapacity {
            required_bits: envelope_bit_length,
            available_bits: buffer_length_samples,
        });
    }
    Ok(())
}

/// Largest ciphertext (tag included) that fits next to the fixed header and delimiter.
pub fn max_ciphertext_len(buffer_length_samples: usize) -> usize {
    (buffer_length_samples / 8).saturating_sub(HEADER_LEN + DELIMITER_LEN)
}

/// Largest compressed payload a buffer can carry (ciphertext minus the AEAD tag).
pub fn max_compressed_len(buffer_length_samples: usize) -> usize {
    max_ciphertext_len(buffer_length_samples).saturating_sub(TAG_LEN)
}

/// Fit of one envelope against one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityPlan {
    pub available_bits: usize,
    pub required_bits: usize,
}

impl CapacityPlan {
    pub fn new(buffer_length_samples: usize, envelope_byte_len: usize) -> Result<Self, StegoError> {
        Ok(Self {
            available_bits: buffer_length_samples,
            required_bits: required_bits(envelope_byte_len)?,
        })
    }

    pub fn fits(&self) -> bool {
        self.required_bits <= self.available_bits
    }

    /// Unused samples after embedding; zero when the envelope does not fit.
    pub fn spare_bits(&self) -> usize {
        self.available_bits.saturating_sub(self.required_bits)
    }

    /// Fraction of the buffer the envelope occupies.
    pub fn utilization(&self) -> f64 {
        if self.available_bits == 0 {
            return 0.0;
        }
        self.required_bits as f64 / self.available_bits as f64
    }

    pub fn check(&self) -> Result<(), StegoError> {
        check_capacity(self.available_bits, self.required_bits)
    }
}

/// What an image of a given shape can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCapacity {
    pub available_bits: usize,
    pub max_ciphertext_len: usize,
    pub max_compressed_len: usize,
}

impl ImageCapacity {
    pub fn for_samples(buffer_length_samples: usize) -> Self {
        Self {
            available_bits: buffer_length_samples,
            max_ciphertext_len: max_ciphertext_len(buffer_length_samples),
            max_compressed_len: max_compressed_len(buffer_length_samples),
        }
    }
}
