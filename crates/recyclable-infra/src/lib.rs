//! Infrastructure layer for the recyclable catalog
//!
//! File-backed repository implementations, the local object store, the CSV
//! bulk importer and the TOML capture-plan loader.

pub mod capture_plan_loader;
pub mod csv_loader;
pub mod persistence;

pub use capture_plan_loader::CapturePlanFile;
pub use csv_loader::{import_directory, CsvLoaderError, ImportReport};
pub use persistence::{FileContainerRepository, FileImageRepository, LocalObjectStore};
