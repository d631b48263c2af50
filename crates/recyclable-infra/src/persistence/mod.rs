//! Persistence implementations
//!
//! File-based implementations of the repository traits. Each store keeps its
//! records in memory and rewrites one JSON file on every change. A change is
//! committed to memory only after the file was written. Captured image bytes
//! live next to the stores in a [`LocalObjectStore`].

mod file_container_repo;
mod file_image_repo;
mod local_object_store;

pub use file_container_repo::FileContainerRepository;
pub use file_image_repo::FileImageRepository;
pub use local_object_store::LocalObjectStore;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use recyclable_types::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read a JSON array store; a missing file is an empty store
fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader)
        .map_err(|e| StoreError::Corrupted(format!("{}: {}", path.display(), e)).into())
}

/// Write all records through a temporary file so readers never see a partial store
fn persist_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    write_via_tmp(path, |writer| Ok(serde_json::to_writer_pretty(writer, records)?))
}

/// Write `path` by filling `{path}.tmp` and renaming it over the target.
/// The temporary file is removed when any step fails.
fn write_via_tmp<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let result = (|| -> Result<()> {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        fill(&mut writer)?;
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
