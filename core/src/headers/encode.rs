//! headers/encode.rs
//!
//! Header encoding utilities.
//!
//! Design notes:
//! - Serializes `EnvelopeHeader` into a fixed 66-byte buffer in big-endian order.
//! - Field order must match `decode.rs` exactly.
//! - Validation runs first so a malformed header is never embedded.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{DATA_LENGTH_LEN, HEADER_LEN, KEY_MATERIAL_LEN, SALT_LEN, SIGNATURE_LEN, VERSION_LEN};
use crate::headers::types::{EnvelopeHeader, HeaderError};

/// Serialize an `EnvelopeHeader` into a 66-byte buffer in big-endian order.
///
/// # Returns
/// - `Ok([u8; HEADER_LEN])` containing the encoded header bytes.
/// - `Err(HeaderError)` if validation fails (bad signature, unknown version, zero salt).
#[inline]
pub fn encode_header_be(h: &EnvelopeHeader) -> Result<[u8; HEADER_LEN], HeaderError> {
    h.validate()?;

    let mut out = [0u8; HEADER_LEN];
    let mut i = 0usize;

    fn put_bytes(out: &mut [u8], i: &mut usize, b: &[u8]) {
        out[*i..*i + b.len()].copy_from_slice(b);
        *i += b.len();
    }

    put_bytes(&mut out, &mut i, &h.signature);                           // 0..6   signature
    BigEndian::write_u32(&mut out[i..i + VERSION_LEN], h.version);       // 6..10  version
    i += VERSION_LEN;
    put_bytes(&mut out, &mut i, &h.key_material);                        // 10..42 key material
    put_bytes(&mut out, &mut i, &h.salt);                                // 42..58 salt
    BigEndian::write_u64(&mut out[i..i + DATA_LENGTH_LEN], h.data_length); // 58..66 data length
    i += DATA_LENGTH_LEN;

    debug_assert_eq!(
        i,
        SIGNATURE_LEN + VERSION_LEN + KEY_MATERIAL_LEN + SALT_LEN + DATA_LENGTH_LEN,
        "encoding wrote incorrect length"
    );

    Ok(out)
}
