#![no_main]
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut meta = serde_json::Map::new();
    meta.insert("ss_tag_frequency".into(), Value::String(text.to_string()));
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(text) {
        meta.extend(obj);
    }
    let _ = tensorhead::extract_trigger_words(Some(&meta));
    let _ = tensorhead::extract_catalog_ids(Some(&meta));
});
