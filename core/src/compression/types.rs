//! compression/types.rs
//! Codec traits and compression errors.
use std::fmt;

#[derive(Debug)]
pub enum CompressionError {
    /// zlib levels run 0..=9.
    InvalidLevel { level: u32 },
    CodecProcessFailed { codec: String, msg: String },
    /// Decompressed output grew past the configured bound.
    OutputTooLarge { max: usize },
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompressionError::*;
        match self {
            InvalidLevel { level } =>
                write!(f, "invalid compression level: {} (expected 0..=9)", level),
            CodecProcessFailed { codec, msg } =>
                write!(f, "codec {} process failed: {}", codec, msg),
            OutputTooLarge { max } =>
                write!(f, "decompressed output exceeds {} bytes", max),
        }
    }
}

impl std::error::Error for CompressionError {}

// Codecs are Send.
pub trait Compressor: Send {
    /// Compress one complete buffer into `out`.
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
}

pub trait Decompressor: Send {
    /// Decompress one complete buffer into `out`.
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
}
