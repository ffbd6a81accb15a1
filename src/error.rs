//! Error types for tensorhead.
//!
//! Every failure that can end an extraction is one variant of
//! [`TensorheadError`]. At the public boundary these are turned into data
//! (see [`crate::response::ExtractionResult`]) using their `Display` text.

use crate::io::error::IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tensorhead operations.
#[derive(Debug, Error)]
pub enum TensorheadError {
    /// Path does not resolve to a readable regular file
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Fewer than 8 bytes available for the length prefix
    #[error("File too small: expected an 8-byte header length, found {found} bytes")]
    TruncatedHeader { found: usize },

    /// Fewer header bytes available than the prefix declares
    #[error("Incomplete metadata: header declares {expected} bytes, found {found}")]
    TruncatedBody { expected: u64, found: u64 },

    /// Declared header length is zero or above the safety ceiling
    #[error("Invalid JSON length: {length} (allowed 1..={limit})")]
    InvalidLength { length: u64, limit: u64 },

    /// Header bytes are not UTF-8, not JSON, or not a JSON object
    #[error("Malformed JSON header: {0}")]
    MalformedJson(String),

    /// Header parsed but carries no `__metadata__` object
    #[error("No metadata found")]
    NoMetadataFound,

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl From<std::io::Error> for TensorheadError {
    fn from(err: std::io::Error) -> Self {
        TensorheadError::Io(IoError::StdIo(err))
    }
}

/// Result type alias for tensorhead operations
pub type Result<T> = std::result::Result<T, TensorheadError>;
