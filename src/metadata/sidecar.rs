//! Sidecar catalog metadata.
//!
//! Model managers cache catalog lookups next to the model as
//! `<stem>.metadata.json`:
//!
//! ```json
//! {"civitai": {"modelId": 1234, "id": 5678, "images": [{"url": "https://..."}]}}
//! ```
//!
//! A sidecar is a hint, not a requirement: every failure here is logged and
//! reported as `None`.

use crate::config::SidecarConfig;
use crate::metadata::catalog::CatalogIds;
use crate::metadata::{is_truthy, value_to_string};
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONTAINER_EXTENSION: &str = "safetensors";

/// Location of the sidecar for `path`.
///
/// A trailing `.safetensors` extension is replaced by `suffix`; any other
/// file name gets `suffix` appended.
pub fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let base = match path.extension() {
        Some(ext) if ext == CONTAINER_EXTENSION => path.with_extension(""),
        _ => path.to_path_buf(),
    };
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Read catalog ids and the preview image from the sidecar of `path`.
///
/// Returns `None` when the sidecar is missing, unreadable, malformed, or
/// carries no id and no image.
pub fn read_sidecar(path: &Path, config: &SidecarConfig) -> Option<CatalogIds> {
    let sidecar = sidecar_path(path, &config.suffix);
    if !sidecar.is_file() {
        debug!(sidecar = %sidecar.display(), "No sidecar metadata");
        return None;
    }

    let text = match std::fs::read_to_string(&sidecar) {
        Ok(text) => text,
        Err(e) => {
            warn!(sidecar = %sidecar.display(), error = %e, "Cannot read sidecar metadata");
            return None;
        }
    };
    let doc: Value = match serde_json::from_str(&text) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(sidecar = %sidecar.display(), error = %e, "Malformed sidecar metadata");
            return None;
        }
    };

    let ids = catalog_ids_from_sidecar(&doc)?;
    debug!(
        sidecar = %sidecar.display(),
        has_ids = ids.has_ids(),
        "Using sidecar catalog metadata"
    );
    Some(ids)
}

/// Interpret a decoded sidecar document.
pub fn catalog_ids_from_sidecar(doc: &Value) -> Option<CatalogIds> {
    let civitai = doc.get("civitai")?.as_object()?;
    let field = |key: &str| {
        civitai
            .get(key)
            .filter(|v| is_truthy(v))
            .map(value_to_string)
    };

    let preview_image = civitai
        .get("images")
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .and_then(|first| match first {
            Value::String(url) => Some(url.clone()),
            other => other.get("url").and_then(Value::as_str).map(str::to_string),
        })
        .filter(|url| !url.is_empty());

    let ids = CatalogIds {
        model_id: field("modelId"),
        id: field("id"),
        preview_image,
    };
    (!ids.is_empty()).then_some(ids)
}
