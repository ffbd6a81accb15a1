//! Descriptive fields copied through to the report.

use crate::metadata::{probe, ReservedMetadata};
use serde_json::Value;

/// Candidate keys for a human-written description.
pub const DESCRIPTION_KEYS: &[&str] = &["modelspec.description", "ss_comment", "description"];

/// Candidate keys for the base model / architecture.
pub const BASE_MODEL_KEYS: &[&str] = &[
    "modelspec.architecture",
    "ss_base_model_version",
    "base_model",
];

pub fn extract_description(meta: Option<&ReservedMetadata>) -> Option<Value> {
    meta.and_then(|m| probe(m, DESCRIPTION_KEYS)).cloned()
}

pub fn extract_base_model(meta: Option<&ReservedMetadata>) -> Option<Value> {
    meta.and_then(|m| probe(m, BASE_MODEL_KEYS)).cloned()
}
