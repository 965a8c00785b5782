//! engine.rs
//! Encode/decode orchestration over a flat pixel sample buffer.
//!
//! Encode: BUILD_ENVELOPE -> CHECK_CAPACITY -> WRITE_BITS -> DONE
//! Decode: READ_HEADER -> VALIDATE_SIGNATURE -> READ_CIPHERTEXT -> PARSE_ENVELOPE
//!
//! Both directions charge wall time per stage to a `TelemetryTimer`.
//!
//! The caller's buffer is never mutated; encode works on a copy and only
//! returns it once every stage succeeded.

use log::{debug, warn};

use crate::bits::{read_bytes, write_bytes};
use crate::capacity::{CapacityPlan, ImageCapacity};
use crate::config::EngineConfig;
use crate::constants::{DELIMITER_LEN, HEADER_BITS, HEADER_LEN};
use crate::crypto::image_seed;
use crate::headers::{decode_header_be, HeaderError};
use crate::payload::{build_envelope, parse_envelope, HiddenMessage};
use crate::telemetry::{EncodeReport, Stage, StageTimes, StegoCounters, TelemetryTimer};
use crate::types::{PixelShape, StegoError};

/// Result of looking for an envelope in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    Found(HiddenMessage),
    /// No signature at the start of the buffer.
    NotPresent,
}

impl DecodeOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, DecodeOutcome::Found(_))
    }

    pub fn into_message(self) -> Option<HiddenMessage> {
        match self {
            DecodeOutcome::Found(m) => Some(m),
            DecodeOutcome::NotPresent => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StegoEngine {
    config: EngineConfig,
}

impl StegoEngine {
    pub fn new(config: EngineConfig) -> Result<Self, StegoError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ============================================================
    // Encode
    // ============================================================

    /// Hide `message` (and optional `link`) in a copy of `pixels`.
    pub fn encode(
        &self,
        pixels: &[u8],
        shape: PixelShape,
        message: &str,
        link: Option<&str>,
    ) -> Result<Vec<u8>, StegoError> {
        self.encode_with_report(pixels, shape, message, link).map(|(out, _)| out)
    }

    /// `encode` plus the size and timing report of the call.
    pub fn encode_with_report(
        &self,
        pixels: &[u8],
        shape: PixelShape,
        message: &str,
        link: Option<&str>,
    ) -> Result<(Vec<u8>, EncodeReport), StegoError> {
        let samples = shape.validate(pixels.len())?;
        let mut timer = TelemetryTimer::new();
        let mut counters = StegoCounters::default();

        // ---- BUILD_ENVELOPE ----
        let (envelope, bytes) = timer.time(Stage::BuildEnvelope, || {
            let seed = image_seed(pixels, &shape)?;
            let envelope = build_envelope(message, link, &seed, &self.config)?;
            let bytes = envelope.to_bytes()?;
            Ok::<_, StegoError>((envelope, bytes))
        })?;

        // ---- CHECK_CAPACITY ----
        let plan = CapacityPlan::new(samples, bytes.len())?;
        timer.time(Stage::CheckCapacity, || plan.check()).map_err(|e| {
            debug!(
                "envelope of {} bits does not fit {} ({} samples)",
                plan.required_bits, shape, samples
            );
            e
        })?;

        // ---- WRITE_BITS ----
        let mut out = pixels.to_vec();
        let written = timer.time(Stage::WriteBits, || write_bytes(&mut out, &bytes, 0))?;

        timer.finish();
        counters.add_payload(
            envelope.sizes.plaintext_len,
            envelope.sizes.compressed_len,
            envelope.ciphertext.len(),
            bytes.len(),
        );
        counters.add_embed(written, samples);

        debug!(
            "encoded {} envelope bytes into {} ({:.1}% of capacity)",
            bytes.len(),
            shape,
            plan.utilization() * 100.0
        );

        Ok((out, EncodeReport::from(&counters, &timer)))
    }

    // ============================================================
    // Decode
    // ============================================================

    /// Look for an envelope at the start of `pixels`.
    ///
    /// `NotPresent` when the buffer is shorter than a header or carries no
    /// signature. A recognized envelope that fails any later check is an error.
    pub fn decode(&self, pixels: &[u8], shape: PixelShape) -> Result<DecodeOutcome, StegoError> {
        self.decode_with_times(pixels, shape).map(|(outcome, _)| outcome)
    }

    /// `decode` plus the wall time of each stage that ran.
    pub fn decode_with_times(
        &self,
        pixels: &[u8],
        shape: PixelShape,
    ) -> Result<(DecodeOutcome, StageTimes), StegoError> {
        let samples = shape.validate(pixels.len())?;
        let mut timer = TelemetryTimer::new();
        if samples < HEADER_BITS {
            debug!("{} samples cannot hold a {} bit header", samples, HEADER_BITS);
            return Ok((DecodeOutcome::NotPresent, timer.stage_times));
        }

        // ---- READ_HEADER / VALIDATE_SIGNATURE ----
        let (header_bytes, cursor, decoded) = timer.time(Stage::ReadHeader, || {
            let (bytes, cursor) = read_bytes(pixels, HEADER_LEN, 0)?;
            let decoded = decode_header_be(&bytes);
            Ok::<_, StegoError>((bytes, cursor, decoded))
        })?;
        let header = match decoded {
            Ok(h) => h,
            Err(HeaderError::InvalidSignature { .. }) => {
                debug!("no envelope signature in {}", shape);
                return Ok((DecodeOutcome::NotPresent, timer.stage_times));
            }
            Err(e) => {
                warn!("envelope header rejected: {}", e);
                return Err(e.into());
            }
        };

        // ---- READ_CIPHERTEXT ----
        let max_data_len = self.config.max_data_len;
        let body_bytes = timer.time(Stage::ReadCiphertext, || -> Result<Vec<u8>, StegoError> {
            if header.data_length > max_data_len {
                warn!("data_length {} above limit {}", header.data_length, max_data_len);
                return Err(StegoError::CorruptPayload(format!(
                    "data_length {} exceeds the {} byte limit",
                    header.data_length, max_data_len
                )));
            }
            let room = (samples - cursor) / 8;
            let body_len = usize::try_from(header.data_length)
                .ok()
                .and_then(|n| n.checked_add(DELIMITER_LEN))
                .filter(|&n| n <= room)
                .ok_or_else(|| {
                    warn!("data_length {} runs past the end of {}", header.data_length, shape);
                    StegoError::CorruptPayload(format!(
                        "data_length {} exceeds the {} bytes left in the image",
                        header.data_length, room
                    ))
                })?;
            read_bytes(pixels, body_len, cursor).map(|(body, _)| body)
        })?;

        // ---- PARSE_ENVELOPE ----
        let hidden = timer.time(Stage::ParseEnvelope, || -> Result<HiddenMessage, StegoError> {
            let seed = image_seed(pixels, &shape)?;
            parse_envelope(&header_bytes, &body_bytes, &seed)
        })?;
        debug!("decoded envelope of {} bytes from {}", HEADER_LEN + body_bytes.len(), shape);
        Ok((DecodeOutcome::Found(hidden), timer.stage_times))
    }

    /// True only when a complete, authentic envelope decodes.
    pub fn verify(&self, pixels: &[u8], shape: PixelShape) -> bool {
        self.decode(pixels, shape).map(|outcome| outcome.is_found()).unwrap_or(false)
    }

    /// Largest payload an image of `shape` can carry.
    pub fn capacity(&self, shape: PixelShape) -> Result<ImageCapacity, StegoError> {
        let samples = shape
            .sample_count()
            .ok_or_else(|| StegoError::InvalidInput(format!("shape {} overflows", shape)))?;
        shape.validate(samples)?;
        Ok(ImageCapacity::for_samples(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StegoEngine>();
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = EngineConfig::default().with_compression_level(12);
        assert!(matches!(StegoEngine::new(cfg), Err(StegoError::InvalidInput(_))));
    }

    #[test]
    fn shape_mismatch_is_invalid_input() {
        let engine = StegoEngine::default();
        let pixels = vec![0u8; 10];
        let err = engine.decode(&pixels, PixelShape::rgb(2, 2)).unwrap_err();
        assert!(matches!(err, StegoError::InvalidInput(_)));
    }

    #[test]
    fn tiny_buffer_is_not_present() {
        let engine = StegoEngine::default();
        let pixels = vec![0xFFu8; 48];
        let out = engine.decode(&pixels, PixelShape::rgb(4, 4)).unwrap();
        assert_eq!(out, DecodeOutcome::NotPresent);
        assert!(!out.is_found());
        assert_eq!(out.into_message(), None);
    }

    #[test]
    fn missing_signature_stops_after_header_stage() {
        let engine = StegoEngine::default();
        let pixels = vec![0u8; 64 * 64 * 3];
        let (out, times) = engine.decode_with_times(&pixels, PixelShape::rgb(64, 64)).unwrap();
        assert_eq!(out, DecodeOutcome::NotPresent);
        assert!(times.has_all(&[Stage::ReadHeader]));
        assert!(!times.has_all(&[Stage::ReadCiphertext]));
        assert!(!times.has_all(&[Stage::ParseEnvelope]));
    }

    #[test]
    fn capacity_of_64x64_rgb() {
        let cap = StegoEngine::default().capacity(PixelShape::rgb(64, 64)).unwrap();
        assert_eq!(cap.available_bits, 64 * 64 * 3);
        assert_eq!(cap.max_ciphertext_len, 64 * 64 * 3 / 8 - HEADER_LEN - DELIMITER_LEN);
    }
}
