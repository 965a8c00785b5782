//! headers/mod.rs
//! Public module export for the envelope header.
//!
//! Notes:
//! - Fixed-size header (66 bytes) lets decode read the header region before it
//!   knows anything about the payload.
//! - The version number selects the AEAD; the layout never changes with it.
//! - The encoded header is bound into the AEAD as associated data, so every
//!   header field is authenticated on decrypt.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;

// Implementation notes
// - Endianness: big-endian across all multi-byte integers.
// - Never trust header fields before the AEAD tag verifies; signature and
//   version checks are only cheap fail-fast filters.
