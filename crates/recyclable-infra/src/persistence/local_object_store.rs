//! Directory-backed ObjectStore

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use recyclable_domain::repository::ObjectStore;
use recyclable_types::{Result, StoreError};
use tracing::debug;

use super::write_via_tmp;

/// Objects stored as plain files at `{root}/{object_key}`
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create the object directory if needed
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path of an object. Keys are relative and may not leave the root.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(StoreError::InvalidObjectKey(key.to_string()).into());
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for LocalObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            return Err(StoreError::DuplicateObjectKey(key.to_string()).into());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_via_tmp(&path, |writer| Ok(writer.write_all(bytes)?))?;
        debug!(key, size = bytes.len(), "object stored");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key)?.is_file())
    }
}
