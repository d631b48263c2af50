//! Repository trait definitions for data persistence

use recyclable_types::Error;

use crate::model::{Container, Image};

/// Repository for catalogued containers
pub trait ContainerRepository {
    /// Insert or replace the container with the same barcode.
    /// Returns `true` when a new record was created.
    fn save(&self, container: &Container) -> Result<bool, Error>;

    /// Point lookup by unique barcode
    fn find_by_barcode(&self, barcode: &str) -> Result<Option<Container>, Error>;

    /// All containers in insertion order
    fn find_all(&self) -> Result<Vec<Container>, Error>;
}

/// Repository for captured images
pub trait ImageRepository {
    /// Store a new image, numbering it after the last image of the same
    /// container. Entity tags and object keys are unique.
    /// Returns the assigned sequence number.
    fn save(&self, image: &Image) -> Result<u32, Error>;

    /// All images in insertion order
    fn find_all(&self) -> Result<Vec<Image>, Error>;

    /// Images of one container in insertion order
    fn find_by_container(&self, barcode: &str) -> Result<Vec<Image>, Error> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|img| img.belongs_to(barcode))
            .collect())
    }

    /// Sequence number for the container's next image (starts at 1)
    fn next_sequence_number(&self, barcode: &str) -> Result<u32, Error> {
        let last = self
            .find_by_container(barcode)?
            .iter()
            .map(|img| img.image_sequence_number)
            .max();
        Ok(last.map_or(1, |n| n + 1))
    }
}

/// Storage for captured image bytes, addressed by object key
pub trait ObjectStore {
    /// Store `bytes` under `key`. An existing object is never overwritten.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), Error>;

    /// Remove the object; a missing object is not an error
    fn remove(&self, key: &str) -> Result<(), Error>;

    fn contains(&self, key: &str) -> Result<bool, Error>;
}
