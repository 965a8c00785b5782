//! telemetry/counters.rs
//! Mutable counters collected during one encode.

/// Deterministic size counters for one envelope.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct StegoCounters {
    pub bytes_plaintext: u64,
    pub bytes_compressed: u64,
    pub bytes_ciphertext: u64,
    pub bytes_envelope: u64,
    pub bits_written: u64,
    pub bits_available: u64,
}

impl StegoCounters {
    /// Record the sizes produced by the payload codec.
    ///
    /// - `pt_len`: framed plaintext (message + link) before compression
    /// - `comp_len`: zlib output
    /// - `ct_len`: ciphertext including the AEAD tag
    /// - `envelope_len`: header + ciphertext + delimiter
    pub fn add_payload(&mut self, pt_len: usize, comp_len: usize, ct_len: usize, envelope_len: usize) {
        self.bytes_plaintext += pt_len as u64;
        self.bytes_compressed += comp_len as u64;
        self.bytes_ciphertext += ct_len as u64;
        self.bytes_envelope += envelope_len as u64;
    }

    /// Record the LSB embedding against the buffer it went into.
    pub fn add_embed(&mut self, bits_written: usize, bits_available: usize) {
        self.bits_written += bits_written as u64;
        self.bits_available += bits_available as u64;
    }

    /// Header, tag and delimiter bytes on top of the compressed payload.
    pub fn overhead_bytes(&self) -> u64 {
        self.bytes_envelope.saturating_sub(self.bytes_compressed)
    }
}
