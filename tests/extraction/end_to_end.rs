//! End-to-end scenarios through `assemble`.

use serde_json::json;
use std::io::Write;
use std::path::Path;
use tensorhead::{assemble, assemble_with_config, ExtractConfig, ExtractionResult};

use crate::common::{create_container_file, create_temp_file, frame};

#[test]
fn empty_header_reports_no_metadata() {
    let file = create_temp_file(&frame(b"{}"));
    let result = assemble(file.path());
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"error": "No metadata found"})
    );
}

#[test]
fn declared_trigger_word_is_reported() {
    let file = create_container_file(&json!({
        "__metadata__": {"modelspec.trigger_words": "foo"}
    }));
    let value = serde_json::to_value(assemble(file.path())).unwrap();
    assert_eq!(value["triggerWords"], json!(["foo"]));
}

#[test]
fn tag_frequency_ranks_trigger_words() {
    let file = create_container_file(&json!({
        "__metadata__": {"ss_tag_frequency": r#"{"ds1": {"a": 3, "b": 9, "c": 1}}"#}
    }));
    let report = assemble(file.path()).report().cloned().unwrap();
    assert_eq!(report.trigger_words[..3], ["b", "a", "c"]);
}

#[test]
fn missing_file_reports_path() {
    let path = Path::new("/nonexistent/dir/missing.safetensors");
    let result = assemble(path);
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"error": "File not found: /nonexistent/dir/missing.safetensors"})
    );
}

#[test]
fn huge_declared_length_is_rejected_without_reading() {
    let declared: u64 = 500 * 1024 * 1024;
    let mut bytes = declared.to_le_bytes().to_vec();
    bytes.extend_from_slice(b"{\"__metadata__\": {}}");
    let file = create_temp_file(&bytes);

    let result = assemble(file.path());
    let error = result.error().expect("error result");
    assert!(error.contains("Invalid JSON length"), "{error}");
    assert!(error.contains(&declared.to_string()), "{error}");
}

#[test]
fn truncated_body_is_reported() {
    let mut bytes = 64u64.to_le_bytes().to_vec();
    bytes.extend_from_slice(b"{\"__metadata__\"");
    let file = create_temp_file(&bytes);
    let error = assemble(file.path()).error().map(str::to_string).unwrap();
    assert!(error.starts_with("Incomplete metadata"), "{error}");
}

#[test]
fn tiny_file_is_reported() {
    let file = create_temp_file(b"\x02\x00\x00");
    let error = assemble(file.path()).error().map(str::to_string).unwrap();
    assert!(error.starts_with("File too small"), "{error}");
}

#[test]
fn malformed_json_is_reported() {
    let file = create_temp_file(&frame(b"{\"__metadata__\": nope}"));
    let error = assemble(file.path()).error().map(str::to_string).unwrap();
    assert!(error.starts_with("Malformed JSON header"), "{error}");
}

#[test]
fn full_success_shape() {
    let file = create_container_file(&json!({
        "__metadata__": {
            "ss_model_id": "A",
            "modelId": "B",
            "versionId": 77,
            "modelspec.trigger_words": ["sks"],
            "modelspec.description": "desc",
            "base_model": "SDXL 1.0"
        },
        "weight": {"dtype": "F32", "shape": [1], "data_offsets": [0, 4]}
    }));
    let value = serde_json::to_value(assemble(file.path())).unwrap();
    assert_eq!(
        value,
        json!({
            "metadata": {
                "ss_model_id": "A",
                "modelId": "B",
                "versionId": 77,
                "modelspec.trigger_words": ["sks"],
                "modelspec.description": "desc",
                "base_model": "SDXL 1.0"
            },
            "triggerWords": ["sks"],
            "civitai": {"modelId": "A", "id": "77"},
            "description": "desc",
            "baseModel": "SDXL 1.0"
        })
    );
}

#[test]
fn metadata_key_order_is_preserved_in_output() {
    let file = create_container_file(&json!({
        "__metadata__": {"zeta": "1", "alpha": "2", "mid": "3"}
    }));
    let text = serde_json::to_string(&assemble(file.path())).unwrap();
    let zeta = text.find("zeta").unwrap();
    let alpha = text.find("alpha").unwrap();
    let mid = text.find("mid").unwrap();
    assert!(zeta < alpha && alpha < mid, "{text}");
}

#[test]
fn sidecar_ids_take_precedence_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("hero.safetensors");
    std::fs::write(
        &model,
        crate::common::encode_container(&json!({"__metadata__": {"ss_model_id": "from-header"}}), 16),
    )
    .unwrap();
    let mut sidecar = std::fs::File::create(dir.path().join("hero.metadata.json")).unwrap();
    sidecar
        .write_all(br#"{"civitai": {"modelId": 11, "id": 22, "images": [{"url": "https://img/p.png"}]}}"#)
        .unwrap();

    // Disabled by default: header ids only.
    let plain = assemble(&model).report().cloned().unwrap();
    assert_eq!(plain.catalog.model_id.as_deref(), Some("from-header"));

    let mut config = ExtractConfig::default();
    config.sidecar.enabled = true;
    let report = assemble_with_config(&model, &config).report().cloned().unwrap();
    assert_eq!(report.catalog.model_id.as_deref(), Some("11"));
    assert_eq!(report.catalog.id.as_deref(), Some("22"));
    assert_eq!(report.catalog.preview_image.as_deref(), Some("https://img/p.png"));
}

#[test]
fn sidecar_without_ids_falls_back_to_header() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("villain.safetensors");
    std::fs::write(
        &model,
        crate::common::encode_container(&json!({"__metadata__": {"version_id": "5"}}), 0),
    )
    .unwrap();
    std::fs::write(dir.path().join("villain.metadata.json"), r#"{"civitai": {}}"#).unwrap();

    let mut config = ExtractConfig::default();
    config.sidecar.enabled = true;
    let report = assemble_with_config(&model, &config).report().cloned().unwrap();
    assert_eq!(report.catalog.id.as_deref(), Some("5"));
    assert_eq!(report.catalog.model_id, None);
}

#[test]
fn header_limit_comes_from_config() {
    let file = create_container_file(&json!({"__metadata__": {"k": "v"}}));
    let mut config = ExtractConfig::default();
    config.header.max_header_len = 8;
    let result = assemble_with_config(file.path(), &config);
    assert!(matches!(result, ExtractionResult::Failure { ref error } if error.contains("Invalid JSON length")));
}

#[test]
fn oversized_header_ceiling_never_panics() {
    let text = r#"{"header": {"max_header_len": 18446744073709551615}}"#;
    let err = ExtractConfig::from_json_str(text).unwrap_err();
    assert!(err.to_string().contains("max_header_len"), "{err}");

    // Set directly, the field is clamped to the default ceiling.
    let file = create_container_file(&json!({"__metadata__": {"k": "v"}, "w": {}}));
    let mut config = ExtractConfig::default();
    config.header.max_header_len = u64::MAX;
    let path = file.path().to_path_buf();
    let outcome = std::panic::catch_unwind(|| assemble_with_config(&path, &config));
    let result = outcome.expect("extraction must not panic");
    assert_eq!(result.report().map(|r| r.metadata["k"].clone()), Some(json!("v")));
}
