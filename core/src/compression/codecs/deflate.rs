//! Deflate (zlib wrapper) via flate2.

use std::io::Read;
use std::io::Write;
use flate2::{Compression, write::ZlibEncoder, read::ZlibDecoder};

use crate::compression::types::{Compressor, Decompressor, CompressionError};

pub struct DeflateCompressor {
    level: Compression,
}

impl DeflateCompressor {
    pub fn new(level: u32) -> Result<Self, CompressionError> {
        match level {
            0..=9 => Ok(Self { level: Compression::new(level) }),
            _ => Err(CompressionError::InvalidLevel { level }),
        }
    }
}

impl Compressor for DeflateCompressor {
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let mut enc = ZlibEncoder::new(Vec::new(), self.level);
        enc.write_all(input)
            .map_err(|e| CompressionError::CodecProcessFailed { codec: "deflate".into(), msg: e.to_string() })?;
        let compressed = enc.finish()
            .map_err(|e| CompressionError::CodecProcessFailed { codec: "deflate".into(), msg: e.to_string() })?;

        out.extend_from_slice(&compressed);
        Ok(())
    }
}

/// zlib decoder with a hard cap on output size.
pub struct DeflateDecompressor {
    max_output: usize,
}

impl DeflateDecompressor {
    pub fn new(max_output: usize) -> Self {
        Self { max_output }
    }
}

impl Decompressor for DeflateDecompressor {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        // Read one byte past the cap so overflow is detectable.
        let limit = (self.max_output as u64).saturating_add(1);
        let mut dec = ZlibDecoder::new(input).take(limit);
        let mut decompressed = Vec::new();
        dec.read_to_end(&mut decompressed)
            .map_err(|e| CompressionError::CodecProcessFailed { codec: "deflate".into(), msg: e.to_string() })?;

        if decompressed.len() > self.max_output {
            return Err(CompressionError::OutputTooLarge { max: self.max_output });
        }

        out.extend_from_slice(&decompressed);
        Ok(())
    }
}
