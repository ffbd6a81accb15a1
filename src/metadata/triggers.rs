//! Trigger word mining.
//!
//! Two sources, in this order:
//! 1. `modelspec.trigger_words`, a string or a list of strings.
//! 2. `ss_tag_frequency`, a JSON-encoded `{dataset: {tag: count}}` table
//!    written by kohya-ss trainers. The most frequent tags of each dataset
//!    stand in for trigger words when none were declared.
//!
//! The result keeps first occurrences only and never contains empty strings.

use crate::config::TriggerConfig;
use crate::metadata::ReservedMetadata;
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Key holding explicitly declared trigger words.
pub const TRIGGER_WORDS_KEY: &str = "modelspec.trigger_words";

/// Key holding the JSON-encoded tag frequency table.
pub const TAG_FREQUENCY_KEY: &str = "ss_tag_frequency";

/// One dataset's tags in table order, with their counts.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetTags {
    pub name: String,
    pub tags: Vec<(String, Number)>,
}

impl DatasetTags {
    /// The `n` most frequent tags. Equal counts keep table order.
    pub fn top(&self, n: usize) -> impl Iterator<Item = &str> {
        let mut ranked: Vec<&(String, Number)> = self.tags.iter().collect();
        // sort_by is stable, so ties stay in insertion order
        ranked.sort_by(|a, b| compare_counts(&b.1, &a.1));
        ranked.into_iter().take(n).map(|(tag, _)| tag.as_str())
    }
}

/// Order two counts, exactly when both are integers.
///
/// Integers past 2^53 are not representable in `f64`, so they are compared
/// as `u64`/`i64` first and only mixed or fractional pairs fall back to
/// floating point.
fn compare_counts(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    let as_float = |n: &Number| n.as_f64().unwrap_or(f64::NAN);
    as_float(a).total_cmp(&as_float(b))
}

/// Decode a tag frequency value.
///
/// Accepts a JSON-encoded string or an already-decoded object. Datasets that
/// are not objects are skipped. Any undecodable text or non-numeric count
/// yields `None` so the table contributes nothing at all.
pub fn try_parse_tag_frequency(value: &Value) -> Option<Vec<DatasetTags>> {
    let decoded;
    let table = match value {
        Value::String(text) => {
            decoded = serde_json::from_str::<Value>(text).ok()?;
            decoded.as_object()?
        }
        Value::Object(map) => map,
        _ => return None,
    };

    let mut datasets = Vec::with_capacity(table.len());
    for (name, dataset) in table {
        let Some(entries) = dataset.as_object() else {
            continue;
        };
        let tags = entries
            .iter()
            .map(|(tag, count)| match count {
                Value::Number(n) => Some((tag.clone(), n.clone())),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        datasets.push(DatasetTags {
            name: name.clone(),
            tags,
        });
    }
    Some(datasets)
}

/// Mine trigger words with the default configuration.
pub fn extract_trigger_words(meta: Option<&ReservedMetadata>) -> Vec<String> {
    extract_trigger_words_with(meta, &TriggerConfig::default())
}

/// Mine trigger words from the declared list and the tag frequency table.
pub fn extract_trigger_words_with(
    meta: Option<&ReservedMetadata>,
    config: &TriggerConfig,
) -> Vec<String> {
    let Some(meta) = meta else {
        return Vec::new();
    };

    let mut words = WordSet::default();

    match meta.get(TRIGGER_WORDS_KEY) {
        Some(Value::String(word)) => words.push(word),
        Some(Value::Array(list)) => {
            for word in list.iter().filter_map(Value::as_str) {
                words.push(word);
            }
        }
        _ => {}
    }

    if let Some(raw) = meta.get(TAG_FREQUENCY_KEY) {
        match try_parse_tag_frequency(raw) {
            Some(datasets) => {
                for dataset in &datasets {
                    for tag in dataset.top(config.top_tags_per_dataset) {
                        words.push(tag);
                    }
                }
            }
            None => debug!("Ignoring undecodable {}", TAG_FREQUENCY_KEY),
        }
    }

    words.into_vec()
}

/// Insertion-ordered set of non-empty words.
#[derive(Default)]
struct WordSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl WordSet {
    fn push(&mut self, word: &str) {
        if word.is_empty() || self.seen.contains(word) {
            return;
        }
        self.seen.insert(word.to_string());
        self.ordered.push(word.to_string());
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}
