//! Use cases

pub mod capture_service;
pub mod manifest_service;

pub use capture_service::{CaptureOptions, CaptureService, CaptureServiceError};
pub use manifest_service::{write_atomic, ClassifiedImage, ManifestKind, ManifestService};
