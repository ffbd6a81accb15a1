//! Interpretation of the reserved `__metadata__` object.
//!
//! Producers (kohya-ss trainers, ModelSpec writers, catalog tools) each use
//! their own key names, so nothing here assumes a schema. Each derived field
//! has an ordered list of candidate keys and the first truthy value wins.

pub mod catalog;
pub mod fields;
pub mod sidecar;
pub mod triggers;

use crate::header::RawHeader;
use serde_json::{Map, Value};
use tracing::trace;

/// Reserved top-level header key holding producer metadata.
pub const METADATA_KEY: &str = "__metadata__";

/// The producer metadata object.
pub type ReservedMetadata = Map<String, Value>;

/// Isolate the reserved metadata object, if the header has one.
///
/// A missing key and a non-object value both yield `None`; neither is an
/// error since containers may legitimately omit metadata.
pub fn extract_metadata(header: &RawHeader) -> Option<&ReservedMetadata> {
    header.get(METADATA_KEY).and_then(Value::as_object)
}

/// Loose truthiness used by every candidate probe.
///
/// `null`, `false`, numeric zero, the empty string, and empty arrays or
/// objects count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Return the value of the first candidate key present with a truthy value.
///
/// Candidates after the first hit are never consulted.
pub fn probe<'a>(meta: &'a ReservedMetadata, candidates: &[&str]) -> Option<&'a Value> {
    candidates.iter().find_map(|key| {
        let value = meta.get(*key).filter(|v| is_truthy(v))?;
        trace!(key = *key, "Candidate key matched");
        Some(value)
    })
}

/// Render a probed value as a plain string.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
