//! Configuration for metadata extraction.
//!
//! Provides centralized configuration for every extraction component with
//! defaults matching the de-facto safetensors conventions. Every field is
//! optional when loading from JSON; missing fields keep their default.

use crate::error::{Result, TensorheadError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default safety ceiling for the declared JSON header length (100 MiB).
pub const DEFAULT_MAX_HEADER_LEN: u64 = 100 * 1024 * 1024;

/// Master configuration for the extraction pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Header parsing limits.
    pub header: HeaderConfig,
    /// Trigger word mining.
    pub triggers: TriggerConfig,
    /// Sidecar catalog metadata lookup.
    pub sidecar: SidecarConfig,
    /// Whole-file hashing.
    pub hashing: HashConfig,
}

impl ExtractConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| TensorheadError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that cannot be expressed through the types alone.
    pub fn validate(&self) -> Result<()> {
        let len = self.header.max_header_len;
        if len == 0 || len > DEFAULT_MAX_HEADER_LEN {
            return Err(TensorheadError::Config(format!(
                "header.max_header_len must be in 1..={DEFAULT_MAX_HEADER_LEN}, got {len}"
            )));
        }
        if self.hashing.chunk_size == 0 {
            return Err(TensorheadError::Config(
                "hashing.chunk_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TensorheadError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }
}

/// Header parsing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Largest accepted JSON header, in bytes. Lengths above this are
    /// rejected before anything is allocated.
    pub max_header_len: u64,
}

impl HeaderConfig {
    /// The ceiling actually enforced. Never above [`DEFAULT_MAX_HEADER_LEN`],
    /// whatever the field holds.
    pub fn effective_max_len(&self) -> u64 {
        self.max_header_len.min(DEFAULT_MAX_HEADER_LEN)
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            max_header_len: DEFAULT_MAX_HEADER_LEN,
        }
    }
}

/// Trigger word mining configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Tags taken from each dataset of the tag frequency table.
    pub top_tags_per_dataset: usize,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            top_tags_per_dataset: 5,
        }
    }
}

/// Sidecar (`<stem>.metadata.json`) configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidecarConfig {
    /// Consult the sidecar file for catalog ids.
    pub enabled: bool,
    /// Suffix replacing the `.safetensors` extension.
    pub suffix: String,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            suffix: ".metadata.json".to_string(),
        }
    }
}

/// Whole-file hashing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Include the SHA-256 of the whole file. Reads the tensor payload.
    pub enabled: bool,
    /// Read size used while streaming the file through the hasher.
    pub chunk_size: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            chunk_size: 1024 * 1024,
        }
    }
}
