//! crypto/seed.rs
//! Image-derived seed: the secret half of the key comes from the picture itself.
//!
//! Design:
//! - SHA-256 over a domain tag, the buffer shape, and every sample with its
//!   least-significant bit cleared.
//! - Encode only rewrites LSBs, so the seed computed on the stego image equals
//!   the seed computed on the cover image.
//! - Any change to a higher bit of any sample changes the seed, and with it
//!   the key.

use sha2::{Digest, Sha256};

use crate::constants::SEED_DOMAIN;
use crate::crypto::types::{CryptoError, SEED_LEN};
use crate::types::PixelShape;

/// Samples are masked in blocks of this size before hashing.
const MASK_BLOCK: usize = 4096;

/// Derive the 32-byte image seed from a sample buffer and its shape.
///
/// Pure function of its inputs; tests may also hand synthetic seeds straight
/// to `derive_key`.
pub fn image_seed(samples: &[u8], shape: &PixelShape) -> Result<[u8; SEED_LEN], CryptoError> {
    if samples.is_empty() {
        return Err(CryptoError::EmptySeedInput);
    }

    let mut hasher = Sha256::new();
    hasher.update(SEED_DOMAIN);
    hasher.update(shape.width.to_be_bytes());
    hasher.update(shape.height.to_be_bytes());
    hasher.update([shape.channels]);

    let mut block = [0u8; MASK_BLOCK];
    for chunk in samples.chunks(MASK_BLOCK) {
        for (dst, &src) in block.iter_mut().zip(chunk) {
            *dst = src & 0xFE;
        }
        hasher.update(&block[..chunk.len()]);
    }

    let digest = hasher.finalize();
    let mut seed = [0u8; SEED_LEN];
    seed.copy_from_slice(digest.as_slice());
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_rejected() {
        let shape = PixelShape::rgb(0, 0);
        assert!(matches!(image_seed(&[], &shape), Err(CryptoError::EmptySeedInput)));
    }

    #[test]
    fn lsb_changes_do_not_move_the_seed() {
        let shape = PixelShape::new(4, 4, 1);
        let a: Vec<u8> = (0..16u8).map(|v| v * 9).collect();
        let b: Vec<u8> = a.iter().map(|v| v ^ 1).collect();
        assert_eq!(image_seed(&a, &shape).unwrap(), image_seed(&b, &shape).unwrap());
    }

    #[test]
    fn higher_bit_changes_move_the_seed() {
        let shape = PixelShape::new(4, 4, 1);
        let a: Vec<u8> = (0..16u8).map(|v| v * 9).collect();
        let mut b = a.clone();
        b[7] ^= 0x02;
        assert_ne!(image_seed(&a, &shape).unwrap(), image_seed(&b, &shape).unwrap());
    }

    #[test]
    fn shape_is_part_of_the_seed() {
        let samples = vec![128u8; 12];
        let s1 = image_seed(&samples, &PixelShape::new(2, 2, 3)).unwrap();
        let s2 = image_seed(&samples, &PixelShape::new(4, 1, 3)).unwrap();
        assert_ne!(s1, s2);
    }
}
