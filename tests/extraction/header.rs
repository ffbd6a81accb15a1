//! Header parser behaviour against byte sources and files.

use serde_json::json;
use tensorhead::config::HeaderConfig;
use tensorhead::header::{parse_header, parse_header_bytes, read_header_file, HEADER_PREFIX_LEN};
use tensorhead::TensorheadError;

use crate::common::{create_temp_file, encode_container, TripwireReader};

#[test]
fn never_requests_bytes_past_header() {
    let header = json!({"__metadata__": {"a": "b"}, "t": {"dtype": "F16"}});
    let data = encode_container(&header, 4096);
    let header_end = data.len() - 4096;

    let mut source = TripwireReader::new(data, header_end);
    let parsed = parse_header(&mut source, &HeaderConfig::default()).unwrap();
    assert_eq!(serde_json::Value::Object(parsed), header);
    assert!(source.furthest_request() <= header_end);
}

#[test]
fn invalid_length_stops_after_prefix() {
    let mut data = u64::MAX.to_le_bytes().to_vec();
    data.extend_from_slice(&[0u8; 128]);
    let mut source = TripwireReader::new(data, HEADER_PREFIX_LEN);
    let err = parse_header(&mut source, &HeaderConfig::default()).unwrap_err();
    assert!(matches!(err, TensorheadError::InvalidLength { .. }));
    assert_eq!(source.furthest_request(), HEADER_PREFIX_LEN);
}

#[test]
fn file_and_buffer_agree() {
    let header = json!({"__metadata__": {"ss_comment": "same"}});
    let data = encode_container(&header, 64);
    let file = create_temp_file(&data);

    let from_file = read_header_file(file.path(), &HeaderConfig::default()).unwrap();
    let from_bytes = parse_header_bytes(&data, &HeaderConfig::default()).unwrap();
    assert_eq!(from_file, from_bytes);
}

#[test]
fn empty_file_is_truncated_header() {
    let file = create_temp_file(b"");
    let err = read_header_file(file.path(), &HeaderConfig::default()).unwrap_err();
    assert!(matches!(err, TensorheadError::TruncatedHeader { found: 0 }));
}

#[test]
fn top_level_string_is_malformed() {
    let data = crate::common::frame(br#""just text""#);
    let err = parse_header_bytes(&data, &HeaderConfig::default()).unwrap_err();
    assert!(matches!(err, TensorheadError::MalformedJson(_)));
}
