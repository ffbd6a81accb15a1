//! Safetensors header parsing.
//!
//! Layout, as written by every safetensors producer:
//!
//! ```text
//! offset 0     : u64 little-endian N
//! offset 8     : N bytes of UTF-8 JSON (an object)
//! offset 8+N   : tensor payload
//! ```
//!
//! Only the first `8 + N` bytes are ever requested from the source.

use crate::config::HeaderConfig;
use crate::error::{Result, TensorheadError};
use crate::io::{BoundedReader, IOLimits, IOUtils, SafeFileReader};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Size of the length prefix in bytes.
pub const HEADER_PREFIX_LEN: usize = 8;

/// Default ceiling on the declared JSON length (100 MiB).
pub const MAX_HEADER_LEN: u64 = crate::config::DEFAULT_MAX_HEADER_LEN;

// Upper bound on the up-front allocation for the JSON body. Larger headers
// grow the buffer as bytes actually arrive.
const PREALLOC_CAP: u64 = 1024 * 1024;

/// The decoded JSON header: top-level keys in file order.
pub type RawHeader = Map<String, Value>;

/// Decoded length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub json_len: u64,
}

impl ContainerHeader {
    pub fn from_prefix(prefix: [u8; HEADER_PREFIX_LEN]) -> Self {
        Self {
            json_len: u64::from_le_bytes(prefix),
        }
    }

    /// Validate against the configured ceiling.
    pub fn validate(&self, config: &HeaderConfig) -> Result<()> {
        let limit = config.effective_max_len();
        if self.json_len == 0 || self.json_len > limit {
            warn!(json_len = self.json_len, limit, "Rejecting header length");
            return Err(TensorheadError::InvalidLength {
                length: self.json_len,
                limit,
            });
        }
        Ok(())
    }

    /// Offset of the first payload byte.
    pub fn data_offset(&self) -> u64 {
        (HEADER_PREFIX_LEN as u64).saturating_add(self.json_len)
    }
}

/// Read and validate the 8-byte length prefix.
pub fn read_prefix<R: Read + ?Sized>(source: &mut R, config: &HeaderConfig) -> Result<ContainerHeader> {
    let mut prefix = [0u8; HEADER_PREFIX_LEN];
    let found = IOUtils::read_up_to(source, &mut prefix)?;
    if found < HEADER_PREFIX_LEN {
        return Err(TensorheadError::TruncatedHeader { found });
    }
    let header = ContainerHeader::from_prefix(prefix);
    header.validate(config)?;
    Ok(header)
}

/// Parse the JSON header from a byte source positioned at offset 0.
pub fn parse_header<R: Read>(source: &mut R, config: &HeaderConfig) -> Result<RawHeader> {
    let header = read_prefix(source, config)?;
    let expected = header.json_len;

    let mut body = Vec::with_capacity(expected.min(PREALLOC_CAP) as usize);
    let mut bounded = BoundedReader::new(source, expected);
    bounded.read_to_end(&mut body)?;
    let found = bounded.bytes_read();
    if found < expected {
        return Err(TensorheadError::TruncatedBody { expected, found });
    }

    debug!(
        json_len = expected,
        data_offset = header.data_offset(),
        "Read safetensors header"
    );
    decode_header(&body)
}

/// Parse a header from an in-memory buffer.
pub fn parse_header_bytes(data: &[u8], config: &HeaderConfig) -> Result<RawHeader> {
    let mut cursor = data;
    parse_header(&mut cursor, config)
}

/// Open `path` read-only and parse its header. The file handle is released
/// before this returns.
pub fn read_header_file<P: AsRef<Path>>(path: P, config: &HeaderConfig) -> Result<RawHeader> {
    let limits = IOLimits {
        max_read_bytes: header_read_budget(config),
    };
    let mut reader = SafeFileReader::open(path, limits)?;
    debug!(file_size = reader.size(), "Reading safetensors header");
    let mut bounded = reader.bounded_reader()?;
    parse_header(&mut bounded, config)
}

/// Bytes a file read may consume: the prefix plus the largest accepted body.
fn header_read_budget(config: &HeaderConfig) -> u64 {
    (HEADER_PREFIX_LEN as u64).saturating_add(config.effective_max_len())
}

fn decode_header(body: &[u8]) -> Result<RawHeader> {
    let text = std::str::from_utf8(body)
        .map_err(|e| TensorheadError::MalformedJson(format!("header is not UTF-8: {e}")))?;
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(TensorheadError::MalformedJson(format!(
            "expected a JSON object, found {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(TensorheadError::MalformedJson(e.to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
