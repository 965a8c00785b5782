//! constants.rs
//! Protocol-wide immutable constants for the Celfie envelope.
//!
//! Wire notes:
//! - Multi-byte integers in the envelope are big-endian.
//! - Field widths never change between versions; only the AEAD behind the
//!   ciphertext does.

/// Magic signature that opens every envelope.
// Protocol magic fields are fixed-size arrays so the type enforces the width.
pub const SIGNATURE: [u8; 6] = *b"CELFIE";

/// End-of-payload marker written right after the ciphertext.
pub const DELIMITER: [u8; 8] = [0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF];

/// Envelope version identifiers (mirrored in headers).
pub mod version_ids {
    pub const V1_CHACHA20_POLY1305: u32 = 0x0000_0001;
    pub const V2_AES256_GCM: u32        = 0x0000_0002;
}

/// Field widths of the fixed header, in bytes.
pub const SIGNATURE_LEN: usize = 6;
pub const VERSION_LEN: usize = 4;
pub const KEY_MATERIAL_LEN: usize = 32;
pub const SALT_LEN: usize = 16;
pub const DATA_LENGTH_LEN: usize = 8;
pub const DELIMITER_LEN: usize = 8;

/// Fixed header size (66 bytes): signature + version + key_material + salt + data_length.
pub const HEADER_LEN: usize =
    SIGNATURE_LEN + VERSION_LEN + KEY_MATERIAL_LEN + SALT_LEN + DATA_LENGTH_LEN;

/// Bits consumed by the header region (one sample per bit).
pub const HEADER_BITS: usize = HEADER_LEN * 8;

/// PBKDF2 iteration count. Fixed: it is not stored in the envelope.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Application secret mixed into every key derivation.
pub const APP_SECRET: &[u8] = b"celfie-lock|app-secret|v1";

/// Domain tag hashed in front of the pixel content when building the image seed.
pub const SEED_DOMAIN: &[u8] = b"celfie-lock|image-seed|v1";

/// HKDF info labels.
pub const HKDF_INFO_FINGERPRINT: &[u8] = b"celfie-lock|key-fingerprint";
pub const HKDF_INFO_NONCE: &[u8] = b"celfie-lock|aead-nonce";

/// Upper bound on `data_length` accepted on decode (10 MB).
pub const MAX_DATA_LEN: u64 = 10_000_000;

/// Upper bound on the decompressed plaintext size.
pub const MAX_PLAINTEXT_LEN: usize = 64 * 1024 * 1024;

/// Default zlib level.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 9;

/// Legacy separator used when a decoded message is rendered as one string.
pub const LINK_SEPARATOR: &str = "\nLINK:";
