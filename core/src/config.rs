use crate::constants::{DEFAULT_COMPRESSION_LEVEL, MAX_DATA_LEN};
use crate::headers::EnvelopeVersion;
use crate::types::StegoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Envelope version written on encode. Decode accepts every known version.
    pub version: EnvelopeVersion,

    /// zlib level for the plaintext, 0..=9.
    pub compression_level: u32,

    /// Largest `data_length` decode will accept before reading the body.
    pub max_data_len: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: EnvelopeVersion::V1ChaCha20Poly1305,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            max_data_len: MAX_DATA_LEN,
        }
    }
}

impl EngineConfig {
    pub fn with_version(mut self, version: EnvelopeVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    pub fn with_max_data_len(mut self, max: u64) -> Self {
        self.max_data_len = max;
        self
    }

    pub fn validate(&self) -> Result<(), StegoError> {
        if self.compression_level > 9 {
            return Err(StegoError::InvalidInput(format!(
                "compression level must be 0..=9, got {}", self.compression_level
            )));
        }
        if self.max_data_len == 0 {
            return Err(StegoError::InvalidInput("max_data_len must be non-zero".into()));
        }
        Ok(())
    }
}
