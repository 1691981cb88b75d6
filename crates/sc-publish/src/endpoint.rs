//! Destinations for serialized documents.
//!
//! File writes are atomic: the document is written to a temporary file in
//! the destination's own directory and then renamed over the destination,
//! so a concurrent reader sees either the previous document or the new one,
//! never a partial write.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::{PublishError, PublishResult};

/// An in-memory destination, shared with whoever wants to read it.
pub type SharedBuffer = Arc<Mutex<Vec<u8>>>;

#[derive(Clone, Debug)]
pub enum Endpoint {
    /// Replace the file at this path on every write.
    File(PathBuf),
    /// Replace the buffer's contents on every write.
    Buffer(SharedBuffer),
}

impl Endpoint {
    /// A fresh in-memory endpoint and a handle to read it back.
    pub fn buffer() -> (Endpoint, SharedBuffer) {
        let buf = SharedBuffer::default();
        (Endpoint::Buffer(Arc::clone(&buf)), buf)
    }

    /// Replace the destination's contents with `bytes`.
    pub fn write(&self, bytes: &[u8]) -> PublishResult<()> {
        match self {
            Endpoint::File(path) => write_atomic(path, bytes),
            Endpoint::Buffer(buf) => {
                let mut guard = buf.lock();
                guard.clear();
                guard.extend_from_slice(bytes);
                Ok(())
            }
        }
    }
}

impl From<PathBuf> for Endpoint {
    fn from(path: PathBuf) -> Self {
        Endpoint::File(path)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> PublishResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| PublishError::Persist {
        path:   path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
