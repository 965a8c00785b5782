//! telemetry/snapshot.rs
//! Immutable report of one encode call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::StegoCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeReport {
    pub bytes_plaintext: u64,
    pub bytes_compressed: u64,
    pub bytes_ciphertext: u64,
    pub bytes_envelope: u64,
    pub bits_written: u64,
    pub bits_available: u64,
    pub compression_ratio: f64,
    pub utilization: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl EncodeReport {
    pub fn from(counters: &StegoCounters, timer: &TelemetryTimer) -> Self {
        let compression_ratio = if counters.bytes_plaintext > 0 {
            counters.bytes_compressed as f64 / counters.bytes_plaintext as f64
        } else {
            0.0
        };

        let utilization = if counters.bits_available > 0 {
            counters.bits_written as f64 / counters.bits_available as f64
        } else {
            0.0
        };

        Self {
            bytes_plaintext: counters.bytes_plaintext,
            bytes_compressed: counters.bytes_compressed,
            bytes_ciphertext: counters.bytes_ciphertext,
            bytes_envelope: counters.bytes_envelope,
            bits_written: counters.bits_written,
            bits_available: counters.bits_available,
            compression_ratio,
            utilization,
            elapsed: timer.elapsed(),
            stage_times: timer.stage_times.clone(),
        }
    }

    /// Invariants every report must satisfy.
    /// - the envelope wraps the ciphertext
    /// - the ciphertext carries the compressed bytes plus a tag
    /// - exactly one bit per envelope bit was written, and it fit
    pub fn sanity_check(&self) -> bool {
        self.bytes_envelope > self.bytes_ciphertext
            && self.bytes_ciphertext > self.bytes_compressed
            && self.bits_written == self.bytes_envelope * 8
            && self.bits_written <= self.bits_available
            && self.stage_times.total() <= self.elapsed
    }
}
