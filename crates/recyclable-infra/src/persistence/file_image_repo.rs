//! File-based implementation of ImageRepository

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use recyclable_domain::model::Image;
use recyclable_domain::repository::ImageRepository;
use recyclable_types::{Result, StoreError};

use super::{load_records, persist_records};

/// Images stored as a JSON array in `images.json`
pub struct FileImageRepository {
    store_path: PathBuf,
    images: RefCell<Vec<Image>>,
}

impl FileImageRepository {
    pub const FILE_NAME: &'static str = "images.json";

    /// Create or load the image store under `store_dir`
    pub fn open(store_dir: &Path) -> Result<Self> {
        fs::create_dir_all(store_dir)?;
        let store_path = store_dir.join(Self::FILE_NAME);
        let images = load_records(&store_path)?;
        Ok(Self {
            store_path,
            images: RefCell::new(images),
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn len(&self) -> usize {
        self.images.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.borrow().is_empty()
    }
}

impl ImageRepository for FileImageRepository {
    fn save(&self, image: &Image) -> Result<u32> {
        let mut candidate = self.images.borrow().clone();
        if candidate.iter().any(|i| i.aws_entity_tag == image.aws_entity_tag) {
            return Err(StoreError::DuplicateEntityTag(image.aws_entity_tag.clone()).into());
        }
        if candidate.iter().any(|i| i.location.object_key == image.location.object_key) {
            return Err(StoreError::DuplicateObjectKey(image.location.object_key.clone()).into());
        }

        let last = candidate
            .iter()
            .filter(|i| i.container_barcode == image.container_barcode)
            .map(|i| i.image_sequence_number)
            .max();
        let sequence_number = last.map_or(1, |n| n + 1);

        let mut stored = image.clone();
        stored.image_sequence_number = sequence_number;
        candidate.push(stored);

        persist_records(&self.store_path, &candidate)?;
        *self.images.borrow_mut() = candidate;
        Ok(sequence_number)
    }

    fn find_all(&self) -> Result<Vec<Image>> {
        Ok(self.images.borrow().clone())
    }
}
