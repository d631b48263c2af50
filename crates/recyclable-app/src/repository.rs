//! Repository adapters for persistence layer

use std::path::Path;

use recyclable_infra::persistence::{FileContainerRepository, FileImageRepository, LocalObjectStore};
use recyclable_types::Result;

use crate::config::Config;

/// Open file-based container repository
pub fn open_container_repo(config: &Config) -> Result<FileContainerRepository> {
    let store_dir = config.store_dir()?;
    FileContainerRepository::open(&store_dir)
}

/// Open file-based image repository
pub fn open_image_repo(config: &Config) -> Result<FileImageRepository> {
    let store_dir = config.store_dir()?;
    FileImageRepository::open(&store_dir)
}

/// Subdirectory of the store holding captured image bytes
pub const OBJECTS_DIR: &str = "objects";

/// Open the local object store under `{store_dir}/objects`
pub fn open_object_store(config: &Config) -> Result<LocalObjectStore> {
    let store_dir = config.store_dir()?;
    LocalObjectStore::open(&store_dir.join(OBJECTS_DIR))
}

/// Open both repositories at a custom directory
pub fn open_repos_at(store_dir: &Path) -> Result<(FileContainerRepository, FileImageRepository)> {
    Ok((
        FileContainerRepository::open(store_dir)?,
        FileImageRepository::open(store_dir)?,
    ))
}
