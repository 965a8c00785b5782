//! bits.rs
//! LSB bit packer over a flat sample buffer.
//!
//! Contract:
//! - One payload bit per sample; only bit 0 of a sample is ever written.
//! - Bits are taken most-significant first within each source byte.
//! - The cursor (`offset`, in samples) is passed in and returned; no hidden state,
//!   so a long envelope can be streamed across several calls.
//! - A request that overruns the buffer fails with `CapacityExceeded` before
//!   any sample is touched.

use crate::types::StegoError;

#[inline]
fn ensure_room(buffer_len: usize, offset: usize, requested: usize) -> Result<(), StegoError> {
    let remaining = buffer_len.saturating_sub(offset);
    if requested > remaining {
        return Err(StegoError::CapacityExceeded { requested, remaining });
    }
    Ok(())
}

#[inline]
fn bytes_as_samples(n: usize) -> Result<usize, StegoError> {
    n.checked_mul(8).ok_or(StegoError::CapacityExceeded { requested: usize::MAX, remaining: 0 })
}

/// Expand bytes into bits, MSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Pack bits (MSB first) back into bytes. A trailing partial byte is rejected.
pub fn bits_to_bytes(bits: &[bool]) -> Result<Vec<u8>, StegoError> {
    if bits.len() % 8 != 0 {
        return Err(StegoError::InvalidInput(format!(
            "bit count {} is not a whole number of bytes", bits.len()
        )));
    }
    Ok(bits
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect())
}

/// Overwrite the LSB of `buffer[offset..offset + bits.len()]` with `bits`.
/// Returns the cursor just past the last written sample.
pub fn write_bits(buffer: &mut [u8], bits: &[bool], offset: usize) -> Result<usize, StegoError> {
    ensure_room(buffer.len(), offset, bits.len())?;
    for (sample, &bit) in buffer[offset..offset + bits.len()].iter_mut().zip(bits) {
        *sample = (*sample & 0xFE) | bit as u8;
    }
    Ok(offset + bits.len())
}

/// Read `count` LSBs starting at `offset`.
/// Returns the bits and the cursor just past the last read sample.
pub fn read_bits(buffer: &[u8], count: usize, offset: usize) -> Result<(Vec<bool>, usize), StegoError> {
    ensure_room(buffer.len(), offset, count)?;
    let bits = buffer[offset..offset + count].iter().map(|s| s & 1 == 1).collect();
    Ok((bits, offset + count))
}

/// Byte-level form of `write_bits`: embeds `bytes` without materializing a bit vector.
pub fn write_bytes(buffer: &mut [u8], bytes: &[u8], offset: usize) -> Result<usize, StegoError> {
    let needed = bytes_as_samples(bytes.len())?;
    ensure_room(buffer.len(), offset, needed)?;
    let region = &mut buffer[offset..offset + needed];
    for (chunk, &byte) in region.chunks_exact_mut(8).zip(bytes) {
        for (i, sample) in chunk.iter_mut().enumerate() {
            let bit = (byte >> (7 - i)) & 1;
            *sample = (*sample & 0xFE) | bit;
        }
    }
    Ok(offset + needed)
}

/// Byte-level form of `read_bits`: extracts `len` bytes starting at `offset`.
pub fn read_bytes(buffer: &[u8], len: usize, offset: usize) -> Result<(Vec<u8>, usize), StegoError> {
    let needed = bytes_as_samples(len)?;
    ensure_room(buffer.len(), offset, needed)?;
    let bytes = buffer[offset..offset + needed]
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, s| (acc << 1) | (s & 1)))
        .collect();
    Ok((bytes, offset + needed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_first_order() {
        let bits = bytes_to_bits(&[0b1000_0001, 0x40]);
        assert_eq!(&bits[..8], &[true, false, false, false, false, false, false, true]);
        assert_eq!(&bits[8..10], &[false, true]);
    }

    #[test]
    fn partial_byte_is_rejected() {
        assert!(matches!(bits_to_bytes(&[true; 7]), Err(StegoError::InvalidInput(_))));
    }

    #[test]
    fn write_keeps_high_bits() {
        let mut buf = vec![0xFF, 0x00, 0xAA, 0x55];
        let next = write_bits(&mut buf, &[false, true, true, false], 0).unwrap();
        assert_eq!(next, 4);
        assert_eq!(buf, vec![0xFE, 0x01, 0xAB, 0x54]);
    }

    #[test]
    fn overrun_fails_without_writing() {
        let mut buf = vec![0u8; 10];
        let err = write_bits(&mut buf, &[true; 4], 8).unwrap_err();
        assert!(matches!(err, StegoError::CapacityExceeded { requested: 4, remaining: 2 }));
        assert!(buf.iter().all(|&s| s == 0));

        let err = read_bytes(&buf, 2, 0).unwrap_err();
        assert!(matches!(err, StegoError::CapacityExceeded { requested: 16, remaining: 10 }));
    }

    #[test]
    fn offset_past_end_reports_zero_remaining() {
        let buf = vec![0u8; 4];
        let err = read_bits(&buf, 1, 9).unwrap_err();
        assert!(matches!(err, StegoError::CapacityExceeded { requested: 1, remaining: 0 }));
    }

    #[test]
    fn byte_and_bit_forms_agree() {
        let payload = b"CELFIE\x00\xff";
        let mut a = vec![0x80u8; 80];
        let mut b = a.clone();
        write_bytes(&mut a, payload, 3).unwrap();
        write_bits(&mut b, &bytes_to_bits(payload), 3).unwrap();
        assert_eq!(a, b);

        let (bits, next) = read_bits(&a, payload.len() * 8, 3).unwrap();
        assert_eq!(next, 3 + 64);
        assert_eq!(bits_to_bytes(&bits).unwrap(), payload.to_vec());
    }
}
