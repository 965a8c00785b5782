//! compression/mod.rs
//! Plaintext compression ahead of encryption.
//!
//! Notes:
//! - Compress-then-encrypt, never the reverse: ciphertext does not compress.
//! - zlib output is deterministic for a given level, so the envelope size of a
//!   message can be computed ahead of time.

pub mod types;
pub mod codecs;

pub use types::*;
pub use codecs::{DeflateCompressor, DeflateDecompressor};

/// Compress `data` with zlib at `level` (0..=9).
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::with_capacity(data.len() / 2 + 16);
    DeflateCompressor::new(level)?.compress_chunk(data, &mut out)?;
    Ok(out)
}

/// Decompress a zlib stream, refusing output larger than `max_output` bytes.
pub fn decompress(data: &[u8], max_output: usize) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::new();
    DeflateDecompressor::new(max_output).decompress_chunk(data, &mut out)?;
    Ok(out)
}
