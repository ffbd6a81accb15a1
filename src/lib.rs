//! Read descriptive metadata from safetensors containers.
//!
//! Only the length prefix and the JSON header are read; the tensor payload is
//! never touched unless whole-file hashing is explicitly enabled.
//!
//! ```no_run
//! let result = tensorhead::assemble("/models/loras/style.safetensors");
//! println!("{}", serde_json::to_string(&result).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod hashing;
pub mod header;
pub mod io;
pub mod logging;
pub mod metadata;
pub mod response;

pub use config::ExtractConfig;
pub use error::{Result, TensorheadError};
pub use header::{parse_header, read_header_file, RawHeader};
pub use metadata::catalog::{extract_catalog_ids, CatalogIds};
pub use metadata::triggers::extract_trigger_words;
pub use metadata::{extract_metadata, ReservedMetadata};
pub use response::{assemble, assemble_with_config, ExtractionReport, ExtractionResult};
