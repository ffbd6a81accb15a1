//! Assembly of the final extraction result.
//!
//! [`assemble`] is the single entry point callers use: give it a path, get
//! back an [`ExtractionResult`]. Failures are data, never panics or `Err`.

use crate::config::ExtractConfig;
use crate::error::{Result, TensorheadError};
use crate::hashing::sha256_file;
use crate::header::read_header_file;
use crate::io::IOUtils;
use crate::metadata::catalog::{extract_catalog_ids, CatalogIds};
use crate::metadata::fields::{extract_base_model, extract_description};
use crate::metadata::sidecar::read_sidecar;
use crate::metadata::triggers::extract_trigger_words_with;
use crate::metadata::{extract_metadata, ReservedMetadata};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Everything derived from a container with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    /// The reserved metadata object, verbatim.
    pub metadata: ReservedMetadata,
    pub trigger_words: Vec<String>,
    #[serde(rename = "civitai")]
    pub catalog: CatalogIds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model: Option<Value>,
    /// Uppercase SHA-256 of the whole file, when hashing is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Outcome of one extraction.
///
/// Serializes as the report itself on success and as `{"error": "..."}` on
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Success(ExtractionReport),
    Failure { error: String },
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success(_))
    }

    pub fn report(&self) -> Option<&ExtractionReport> {
        match self {
            ExtractionResult::Success(report) => Some(report),
            ExtractionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success(_) => None,
            ExtractionResult::Failure { error } => Some(error),
        }
    }
}

impl From<Result<ExtractionReport>> for ExtractionResult {
    fn from(result: Result<ExtractionReport>) -> Self {
        match result {
            Ok(report) => ExtractionResult::Success(report),
            Err(e) => ExtractionResult::Failure {
                error: e.to_string(),
            },
        }
    }
}

/// Extract metadata from `path` with the default configuration.
pub fn assemble<P: AsRef<Path>>(path: P) -> ExtractionResult {
    assemble_with_config(path, &ExtractConfig::default())
}

/// Extract metadata from `path`.
pub fn assemble_with_config<P: AsRef<Path>>(path: P, config: &ExtractConfig) -> ExtractionResult {
    let path = path.as_ref();
    let span = crate::span_trace!("extract", path = %path.display());
    let _guard = span.enter();

    build_report(path, config)
        .map_err(|e| crate::log_error!(e))
        .into()
}

/// The fallible core of [`assemble_with_config`].
pub fn build_report(path: &Path, config: &ExtractConfig) -> Result<ExtractionReport> {
    if !IOUtils::is_regular_file(path) {
        return Err(TensorheadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let header = read_header_file(path, &config.header)?;
    let meta = extract_metadata(&header).ok_or(TensorheadError::NoMetadataFound)?;
    debug!(keys = meta.len(), "Found reserved metadata");

    let header_ids = extract_catalog_ids(Some(meta));
    let sidecar_ids = if config.sidecar.enabled {
        read_sidecar(path, &config.sidecar)
    } else {
        None
    };
    let catalog = match sidecar_ids {
        Some(ids) => ids.or_fallback(header_ids),
        None => header_ids,
    };

    let sha256 = if config.hashing.enabled {
        match sha256_file(path, config.hashing.chunk_size) {
            Ok(digest) => Some(digest),
            Err(e) => {
                warn!(error = %e, "Hashing failed, omitting sha256");
                None
            }
        }
    } else {
        None
    };

    Ok(ExtractionReport {
        metadata: meta.clone(),
        trigger_words: extract_trigger_words_with(Some(meta), &config.triggers),
        catalog,
        description: extract_description(Some(meta)),
        base_model: extract_base_model(Some(meta)),
        sha256,
    })
}
