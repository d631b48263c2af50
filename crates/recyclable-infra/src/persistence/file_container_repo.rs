//! File-based implementation of ContainerRepository

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use recyclable_domain::model::Container;
use recyclable_domain::repository::ContainerRepository;
use recyclable_types::Result;

use super::{load_records, persist_records};

/// Containers stored as a JSON array in `containers.json`
pub struct FileContainerRepository {
    store_path: PathBuf,
    containers: RefCell<Vec<Container>>,
}

impl FileContainerRepository {
    pub const FILE_NAME: &'static str = "containers.json";

    /// Create or load the container store under `store_dir`
    pub fn open(store_dir: &Path) -> Result<Self> {
        fs::create_dir_all(store_dir)?;
        let store_path = store_dir.join(Self::FILE_NAME);
        let containers = load_records(&store_path)?;
        Ok(Self {
            store_path,
            containers: RefCell::new(containers),
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn len(&self) -> usize {
        self.containers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.borrow().is_empty()
    }
}

impl ContainerRepository for FileContainerRepository {
    fn save(&self, container: &Container) -> Result<bool> {
        let mut candidate = self.containers.borrow().clone();
        let created = match candidate.iter_mut().find(|c| c.barcode == container.barcode) {
            Some(existing) => {
                *existing = container.clone();
                false
            }
            None => {
                candidate.push(container.clone());
                true
            }
        };

        persist_records(&self.store_path, &candidate)?;
        *self.containers.borrow_mut() = candidate;
        Ok(created)
    }

    fn find_by_barcode(&self, barcode: &str) -> Result<Option<Container>> {
        Ok(self
            .containers
            .borrow()
            .iter()
            .find(|c| c.barcode == barcode)
            .cloned())
    }

    fn find_all(&self) -> Result<Vec<Container>> {
        Ok(self.containers.borrow().clone())
    }
}
