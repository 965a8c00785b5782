//! headers/decode.rs
//!
//! Header decoding utilities.
//!
//! Design notes:
//! - Deserializes the first 66 bytes of a buffer into an `EnvelopeHeader`.
//! - Field order must match `encode.rs` exactly.
//! - Validation runs after decoding; the signature is checked before anything
//!   else so a buffer without an envelope fails on the cheapest test.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{DATA_LENGTH_LEN, KEY_MATERIAL_LEN, SALT_LEN, SIGNATURE_LEN, VERSION_LEN};
use crate::headers::types::{EnvelopeHeader, HeaderError};

/// Read a fixed-size array out of `buf` at the cursor and advance it.
#[inline]
fn get_bytes<const N: usize>(buf: &[u8], i: &mut usize) -> [u8; N] {
    let mut dst = [0u8; N];
    dst.copy_from_slice(&buf[*i..*i + N]);
    *i += N;
    dst
}

/// Deserialize a big-endian header into `EnvelopeHeader`.
///
/// # Returns
/// - `Ok(EnvelopeHeader)` if decoding and validation succeed.
/// - `Err(HeaderError)` if the buffer is short or validation fails.
#[inline]
pub fn decode_header_be(buf: &[u8]) -> Result<EnvelopeHeader, HeaderError> {
    if buf.len() < EnvelopeHeader::LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: EnvelopeHeader::LEN });
    }

    let mut i = 0usize;

    let signature = get_bytes::<SIGNATURE_LEN>(buf, &mut i);            // 0..6
    let version = BigEndian::read_u32(&buf[i..i + VERSION_LEN]);         // 6..10
    i += VERSION_LEN;
    let key_material = get_bytes::<KEY_MATERIAL_LEN>(buf, &mut i);      // 10..42
    let salt = get_bytes::<SALT_LEN>(buf, &mut i);                      // 42..58
    let data_length = BigEndian::read_u64(&buf[i..i + DATA_LENGTH_LEN]); // 58..66
    i += DATA_LENGTH_LEN;

    if i != EnvelopeHeader::LEN {
        return Err(HeaderError::BufferTooShort { have: i, need: EnvelopeHeader::LEN });
    }

    let h = EnvelopeHeader { signature, version, key_material, salt, data_length };
    h.validate()?;

    Ok(h)
}
