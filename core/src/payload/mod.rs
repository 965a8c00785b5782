//! payload/mod.rs
//! Payload codec: message framing and the encrypted envelope.

pub mod plaintext;
pub mod envelope;

pub use plaintext::*;
pub use envelope::*;
