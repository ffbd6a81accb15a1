//! Whole-file SHA-256, the key model catalogs use for by-hash lookups.
//!
//! This is the only code path that reads the tensor payload, and it only runs
//! when hashing is enabled in the configuration.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Stream `reader` through SHA-256 and return the uppercase hex digest.
pub fn sha256_reader<R: Read>(reader: &mut R, chunk_size: usize) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size.max(1)];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(hex::encode_upper(hasher.finalize()))
}

/// SHA-256 of the whole file at `path`, uppercase hex.
pub fn sha256_file<P: AsRef<Path>>(path: P, chunk_size: usize) -> io::Result<String> {
    let mut file = File::open(path)?;
    sha256_reader(&mut file, chunk_size)
}
