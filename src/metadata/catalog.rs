//! External catalog (CivitAI) identifiers.

use crate::metadata::{probe, value_to_string, ReservedMetadata};
use serde::{Deserialize, Serialize};

/// Candidate keys for the catalog model id, highest priority first.
pub const MODEL_ID_KEYS: &[&str] = &[
    "modelspec.sai_model_spec",
    "ss_model_id",
    "modelId",
    "model_id",
];

/// Candidate keys for the catalog model-version id, highest priority first.
pub const VERSION_ID_KEYS: &[&str] = &["ss_version_id", "versionId", "version_id"];

/// Candidate keys for a preview image URL, highest priority first.
pub const PREVIEW_IMAGE_KEYS: &[&str] = &[
    "ss_preview_url",
    "preview_url",
    "previewUrl",
    "preview_image",
];

/// Catalog identifiers found for a model. Serializes as the `civitai`
/// object, omitting whatever was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogIds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Model-version id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
}

impl CatalogIds {
    /// True when either id is known.
    pub fn has_ids(&self) -> bool {
        self.model_id.is_some() || self.id.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_ids() && self.preview_image.is_none()
    }

    /// Combine a preferred source with a fallback.
    ///
    /// When `self` carries an id it is kept whole. Otherwise the ids come
    /// from `fallback`, and `self`'s preview image still wins over the
    /// fallback's.
    pub fn or_fallback(self, fallback: CatalogIds) -> CatalogIds {
        if self.has_ids() {
            return self;
        }
        CatalogIds {
            model_id: fallback.model_id,
            id: fallback.id,
            preview_image: self.preview_image.or(fallback.preview_image),
        }
    }
}

/// Probe the metadata for catalog ids. Each field is probed independently.
pub fn extract_catalog_ids(meta: Option<&ReservedMetadata>) -> CatalogIds {
    let Some(meta) = meta else {
        return CatalogIds::default();
    };
    let lookup = |keys: &[&str]| probe(meta, keys).map(value_to_string);
    CatalogIds {
        model_id: lookup(MODEL_ID_KEYS),
        id: lookup(VERSION_ID_KEYS),
        preview_image: lookup(PREVIEW_IMAGE_KEYS),
    }
}
