//! Stage configuration.

use gridbench_core::BulkMode;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings a worker needs to construct and classify invocations.
///
/// Missing fields deserialize to their defaults, so a property layer only has
/// to supply what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StageConfig {
    /// Report transactional buckets instead of plain ones.
    pub transactional: bool,
    /// Mode handed to bulk invocations.
    pub bulk_mode: BulkMode,
    /// Size in bytes of the per-worker streaming buffer.
    pub transfer_buffer_size: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            transactional: false,
            bulk_mode: BulkMode::Native,
            transfer_buffer_size: 8192, // 8 KB
        }
    }
}

impl StageConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTransferBuffer`] if the buffer size is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transfer_buffer_size == 0 {
            return Err(ConfigError::ZeroTransferBuffer);
        }
        Ok(())
    }

    /// Allocates one zeroed streaming buffer. Each worker owns its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTransferBuffer`] if the buffer size is zero.
    pub fn transfer_buffer(&self) -> Result<Vec<u8>, ConfigError> {
        self.validate()?;
        Ok(vec![0; self.transfer_buffer_size])
    }
}
