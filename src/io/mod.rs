//! Bounded and safe I/O utilities for header extraction.
//!
//! Provides a `SafeFileReader` that owns a single read-only file handle and a
//! `BoundedReader` that refuses to hand out bytes past a fixed limit. Neither
//! buffers ahead, so the number of bytes pulled from the file is exactly the
//! number of bytes the caller asked for.

pub mod error;

use crate::io::error::{IoError, Result};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace};

/// Resource limits for I/O operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IOLimits {
    /// The maximum number of bytes a single bounded read may consume.
    pub max_read_bytes: u64,
}

impl Default for IOLimits {
    fn default() -> Self {
        Self {
            max_read_bytes: 8 + 100 * 1024 * 1024, // prefix + 100MB header
        }
    }
}

/// A bounded reader that limits the amount of data read.
///
/// Requests are clamped to the remaining budget before they reach the inner
/// reader; once the limit is hit it reports EOF without touching `inner`.
pub struct BoundedReader<R> {
    inner: R,
    bytes_read: u64,
    limit: u64,
}

impl<R: Read> BoundedReader<R> {
    pub fn new(reader: R, limit: u64) -> Self {
        Self {
            inner: reader,
            bytes_read: 0,
            limit,
        }
    }

    /// Bytes handed out so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.bytes_read >= self.limit {
            return Ok(0); // EOF
        }

        let remaining = self.limit - self.bytes_read;
        let max_to_read = std::cmp::min(buf.len() as u64, remaining) as usize;
        let read_buf = &mut buf[..max_to_read];

        let n = self.inner.read(read_buf)?;
        self.bytes_read += n as u64;

        if self.bytes_read >= self.limit {
            trace!(limit = self.limit, "BoundedReader limit reached");
        }

        Ok(n)
    }
}

/// Safe file reader: one scoped, read-only handle per instance.
///
/// The handle is released when the reader is dropped, on every exit path.
pub struct SafeFileReader {
    file: File,
    size: u64,
    limits: IOLimits,
}

impl SafeFileReader {
    /// Open a regular file with safety limits.
    pub fn open<P: AsRef<Path>>(path: P, limits: IOLimits) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(IoError::NotARegularFile {
                path: path.to_path_buf(),
            });
        }
        let size = metadata.len();

        debug!(
            path = %path.display(),
            size = size,
            limits.max_read_bytes = limits.max_read_bytes,
            "Opening file for safe reading"
        );

        Ok(Self {
            file,
            size,
            limits,
        })
    }

    /// File size at open time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Rewind to the start and hand out a reader capped at `max_read_bytes`.
    pub fn bounded_reader(&mut self) -> Result<BoundedReader<&mut File>> {
        self.file.seek(SeekFrom::Start(0))?;
        Ok(BoundedReader::new(&mut self.file, self.limits.max_read_bytes))
    }
}

/// Utility functions for safe I/O operations.
pub struct IOUtils;

impl IOUtils {
    /// Read into `buf` until it is full or the reader reports EOF.
    ///
    /// Unlike `read_exact`, a short source is not an error; the number of
    /// bytes actually read is returned so callers can report truncation.
    pub fn read_up_to<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    /// Check if a path exists and is a regular file.
    pub fn is_regular_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .metadata()
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}
