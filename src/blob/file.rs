//! File-backed blob store: one file per key under a root directory.
//!
//! Writes go to a temp file in the same directory and are renamed into
//! place, so a crash never leaves a torn session blob behind. Keys are
//! restricted to simple file names; anything that could escape the root
//! directory is rejected as malformed.

use std::io::Write;
use std::path::PathBuf;

use crate::blob::BlobStore;
use crate::error::StoreError;

/// [`BlobStore`] persisting each key as a file under one directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Open (or create) the store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| {
            StoreError::Unavailable(format!("failed to create blob dir {}: {e}", root.display()))
        })?;
        Ok(Self { root })
    }

    /// Resolve a key to its path, rejecting anything but a plain name.
    fn blob_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let plain = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !plain {
            return Err(StoreError::Malformed(format!("invalid blob key: {key:?}")));
        }
        Ok(self.root.join(key))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.blob_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Unavailable(format!(
                "failed to read blob {}: {e}",
                path.display()
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.blob_path(key)?;
        let io_err =
            |e| StoreError::Unavailable(format!("failed to write blob {}: {e}", path.display()));

        // Temp file lives in the root so the rename stays on one filesystem.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)
            .map_err(|e| io_err(e.to_string()))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| io_err(e.to_string()))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| io_err(e.to_string()))?;
        tmp.persist(&path).map_err(|e| io_err(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.blob_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Unavailable(format!(
                "failed to remove blob {}: {e}",
                path.display()
            ))),
        }
    }
}
