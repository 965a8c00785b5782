//! payload/envelope.rs
//! Envelope construction and parsing.
//!
//! Encode: frame -> zlib -> key from (seed, salt) -> header -> AEAD(aad = header) -> delimiter.
//! Decode: header checks -> body length -> key fingerprint -> AEAD open -> inflate
//!         -> unframe -> delimiter.

use log::{debug, warn};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::compression::{compress, decompress};
use crate::config::EngineConfig;
use crate::constants::{DELIMITER, DELIMITER_LEN, HEADER_LEN, MAX_PLAINTEXT_LEN, SALT_LEN};
use crate::crypto::{
    derive_key, derive_nonce_12, key_fingerprint, verify_fingerprint, AeadImpl, CryptoError, SEED_LEN,
    TAG_LEN,
};
use crate::headers::{decode_header_be, encode_header_be, EnvelopeHeader};
use crate::payload::plaintext::HiddenMessage;
use crate::types::StegoError;

/// Byte counts of one built envelope, kept for telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeSizes {
    pub plaintext_len: usize,
    pub compressed_len: usize,
}

/// Fixed header and one variable ciphertext field. `to_bytes` appends the
/// constant delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub header: EnvelopeHeader,
    pub ciphertext: Vec<u8>,
    pub sizes: EnvelopeSizes,
}

impl Envelope {
    /// Total embedded size: header + ciphertext + delimiter.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.ciphertext.len() + DELIMITER_LEN
    }

    /// Serialize for embedding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StegoError> {
        if self.header.data_length != self.ciphertext.len() as u64 {
            return Err(StegoError::InvalidInput(format!(
                "data_length {} does not match ciphertext length {}",
                self.header.data_length,
                self.ciphertext.len()
            )));
        }
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&encode_header_be(&self.header)?);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&DELIMITER);
        Ok(out)
    }
}

/// Draw a random, non-zero salt.
fn fresh_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    loop {
        OsRng.fill_bytes(&mut salt);
        if salt.iter().any(|&b| b != 0) {
            return salt;
        }
    }
}

fn framed_and_compressed(
    message: &str,
    link: Option<&str>,
    config: &EngineConfig,
) -> Result<(usize, Vec<u8>), StegoError> {
    let framed = HiddenMessage::new(message, link).frame()?;
    if framed.len() > MAX_PLAINTEXT_LEN {
        return Err(StegoError::InvalidInput(format!(
            "framed plaintext of {} bytes exceeds the {} byte limit", framed.len(), MAX_PLAINTEXT_LEN
        )));
    }
    let compressed = compress(&framed, config.compression_level)?;
    Ok((framed.len(), compressed))
}

/// Build the envelope for `message` (and optional `link`) under a fresh random salt.
pub fn build_envelope(
    message: &str,
    link: Option<&str>,
    image_seed: &[u8; SEED_LEN],
    config: &EngineConfig,
) -> Result<Envelope, StegoError> {
    build_envelope_with_salt(message, link, image_seed, fresh_salt(), config)
}

/// Deterministic form of `build_envelope` with a caller-chosen salt.
pub fn build_envelope_with_salt(
    message: &str,
    link: Option<&str>,
    image_seed: &[u8; SEED_LEN],
    salt: [u8; SALT_LEN],
    config: &EngineConfig,
) -> Result<Envelope, StegoError> {
    config.validate()?;

    let (plaintext_len, compressed) = framed_and_compressed(message, link, config)?;

    let data_length = (compressed.len() + TAG_LEN) as u64;
    if data_length > config.max_data_len {
        return Err(StegoError::InvalidInput(format!(
            "ciphertext of {} bytes exceeds the {} byte limit", data_length, config.max_data_len
        )));
    }

    let key = derive_key(image_seed, &salt)?;
    let key_material = key_fingerprint(&key, &salt)?;
    let nonce = derive_nonce_12(&key, &salt)?;

    let header = EnvelopeHeader::new(config.version, key_material, salt, data_length);
    let aad = encode_header_be(&header)?;

    let ciphertext = AeadImpl::from_version_and_key(config.version, &key)?.seal(&nonce, &aad, &compressed)?;
    debug_assert_eq!(ciphertext.len() as u64, data_length);

    debug!(
        "built envelope: version={:?} plaintext={}B compressed={}B ciphertext={}B",
        config.version, plaintext_len, compressed.len(), ciphertext.len()
    );

    Ok(Envelope {
        header,
        ciphertext,
        sizes: EnvelopeSizes { plaintext_len, compressed_len: compressed.len() },
    })
}

/// Exact byte length of the envelope `build_envelope` would produce, without encrypting.
pub fn envelope_len(message: &str, link: Option<&str>, config: &EngineConfig) -> Result<usize, StegoError> {
    config.validate()?;
    let (_, compressed) = framed_and_compressed(message, link, config)?;
    Ok(HEADER_LEN + compressed.len() + TAG_LEN + DELIMITER_LEN)
}

/// Parse and open an envelope.
///
/// - `header_bytes`: the 66-byte header region.
/// - `body_bytes`: everything after it: `data_length` ciphertext bytes, then the delimiter.
/// - `image_seed`: seed of the image the envelope was read from.
pub fn parse_envelope(
    header_bytes: &[u8],
    body_bytes: &[u8],
    image_seed: &[u8; SEED_LEN],
) -> Result<HiddenMessage, StegoError> {
    let header = decode_header_be(header_bytes)?;
    let version = header.envelope_version()?;

    let data_len = usize::try_from(header.data_length)
        .map_err(|_| StegoError::CorruptPayload(format!("data_length {} overflows", header.data_length)))?;
    let expected_body = data_len
        .checked_add(DELIMITER_LEN)
        .ok_or_else(|| StegoError::CorruptPayload(format!("data_length {} overflows", data_len)))?;
    if body_bytes.len() != expected_body {
        return Err(StegoError::CorruptPayload(format!(
            "body holds {} bytes, header announces {} + {} delimiter",
            body_bytes.len(), data_len, DELIMITER_LEN
        )));
    }
    if data_len < TAG_LEN {
        return Err(StegoError::CorruptPayload(format!(
            "data_length {} is shorter than the {} byte tag", data_len, TAG_LEN
        )));
    }
    let (ciphertext, delimiter) = body_bytes.split_at(data_len);

    let key = derive_key(image_seed, &header.salt)?;
    verify_fingerprint(&key, &header.salt, &header.key_material).map_err(|e| {
        warn!("key fingerprint mismatch: image altered or envelope forged");
        e
    })?;

    let nonce = derive_nonce_12(&key, &header.salt)?;
    let compressed = AeadImpl::from_version_and_key(version, &key)?
        .open(&nonce, &header_bytes[..HEADER_LEN], ciphertext)
        .map_err(|e| {
            if matches!(e, CryptoError::TagMismatch) {
                warn!("AEAD authentication failed on {} byte ciphertext", ciphertext.len());
            }
            e
        })?;

    let framed = decompress(&compressed, MAX_PLAINTEXT_LEN)?;
    let hidden = HiddenMessage::unframe(&framed)?;

    if delimiter != DELIMITER {
        warn!("envelope delimiter mismatch");
        return Err(StegoError::CorruptPayload("delimiter mismatch after ciphertext".into()));
    }

    debug!("opened envelope: version={:?} ciphertext={}B plaintext={}B", version, data_len, framed.len());
    Ok(hidden)
}
