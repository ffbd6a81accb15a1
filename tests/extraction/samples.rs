//! Extraction against the checked-in sample containers.

use serde_json::json;
use tensorhead::assemble;

use crate::common::test_data::*;
use crate::common::{sample_file_exists, sample_file_path};

#[test]
fn kohya_lora_sample() {
    if !sample_file_exists(SAMPLE_KOHYA_LORA) {
        println!("Skipping {} - file not found", SAMPLE_KOHYA_LORA);
        return;
    }
    let report = assemble(sample_file_path(SAMPLE_KOHYA_LORA))
        .report()
        .cloned()
        .expect("kohya sample has metadata");

    assert_eq!(
        report.trigger_words,
        ["watercolor", "1girl", "flower", "outdoors", "sky", "landscape"]
    );
    assert!(report.catalog.is_empty());
    assert_eq!(report.description, Some(json!("watercolor style")));
    assert_eq!(report.base_model, Some(json!("sd_v1")));
    assert_eq!(report.metadata["ss_output_name"], "wtrclr");
}

#[test]
fn modelspec_lora_sample() {
    if !sample_file_exists(SAMPLE_MODELSPEC_LORA) {
        println!("Skipping {} - file not found", SAMPLE_MODELSPEC_LORA);
        return;
    }
    let value = serde_json::to_value(assemble(sample_file_path(SAMPLE_MODELSPEC_LORA))).unwrap();

    assert_eq!(value["triggerWords"], json!(["inksketch"]));
    // modelspec.sai_model_spec outranks the other model id keys.
    assert_eq!(value["civitai"], json!({"modelId": "1.0.0", "id": "901234"}));
    assert_eq!(value["description"], "Monochrome ink sketches");
    assert_eq!(value["baseModel"], "stable-diffusion-xl-v1-base/lora");
}

#[test]
fn no_metadata_sample() {
    if !sample_file_exists(SAMPLE_NO_METADATA) {
        println!("Skipping {} - file not found", SAMPLE_NO_METADATA);
        return;
    }
    let result = assemble(sample_file_path(SAMPLE_NO_METADATA));
    assert_eq!(result.error(), Some("No metadata found"));
}
