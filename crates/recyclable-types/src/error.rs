//! Error types for the recyclable catalog

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Errors raised by the container/image stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store file corrupted: {0}")]
    Corrupted(String),

    #[error("Image with entity tag {0} already exists")]
    DuplicateEntityTag(String),

    #[error("Image with object key {0} already exists")]
    DuplicateObjectKey(String),

    #[error("Invalid object key: {0}")]
    InvalidObjectKey(String),
}

/// Violated preconditions of the capture-count allocator
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    #[error("At least one capture category is required")]
    NoCategories,

    #[error("Number of images must be greater than zero")]
    NonPositiveTotal,

    #[error("Invalid percentage for {category}: {value}. Must be between 0 and 100")]
    PercentageOutOfRange { category: String, value: f64 },

    #[error("The percentages must add up to 100% (got {sum})")]
    PercentageSum { sum: f64 },

    #[error("Capture category {0} is listed more than once")]
    DuplicateCategory(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Unknown liquid volume unit: {0}")]
    UnknownVolumeUnit(String),

    #[error("Unknown {field} value: {value}")]
    UnknownChoice { field: &'static str, value: String },

    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    #[error("Invalid object URL: {0}")]
    InvalidObjectUrl(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Capture failed: {0}")]
    Capture(String),
}

pub type Result<T> = std::result::Result<T, Error>;
