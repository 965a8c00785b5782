//! celfie-core
//!
//! Hides an encrypted, compressed text message (and optional link) in the
//! least-significant bits of a lossless image's sample buffer.
//! The key is derived from the image's own content; no password.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

// Layers
pub mod bits;
pub mod capacity;
pub mod compression;
pub mod headers;
pub mod crypto;
pub mod payload;
pub mod telemetry;

pub mod engine;

pub use config::EngineConfig;
pub use engine::{DecodeOutcome, StegoEngine};
pub use payload::HiddenMessage;
pub use types::{PixelShape, StegoError};

/// Encode with the default engine (ChaCha20-Poly1305, zlib level 9).
pub fn encode(
    pixels: &[u8],
    shape: PixelShape,
    message: &str,
    link: Option<&str>,
) -> Result<Vec<u8>, StegoError> {
    StegoEngine::default().encode(pixels, shape, message, link)
}

/// Decode with the default engine.
pub fn decode(pixels: &[u8], shape: PixelShape) -> Result<DecodeOutcome, StegoError> {
    StegoEngine::default().decode(pixels, shape)
}

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::capacity::{CapacityPlan, ImageCapacity};
    pub use crate::config::EngineConfig;
    pub use crate::engine::{DecodeOutcome, StegoEngine};
    pub use crate::headers::EnvelopeVersion;
    pub use crate::payload::HiddenMessage;
    pub use crate::telemetry::EncodeReport;
    pub use crate::types::{PixelShape, StegoError};
}
