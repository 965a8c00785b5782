//! compression/codecs/mod.rs
//! Concrete codecs. The envelope uses zlib only.

pub mod deflate;

pub use deflate::*;
