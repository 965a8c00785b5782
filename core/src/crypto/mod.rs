pub mod types;
pub mod seed;
pub mod kdf;
pub mod nonce;
pub mod aead;

pub use types::*;
pub use seed::*;
pub use kdf::*;
pub use nonce::*;
pub use aead::*;
