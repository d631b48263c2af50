//! Capture plan loader from TOML
//!
//! ```toml
//! total = 20
//!
//! [[categories]]
//! name = "valid"
//! percentage = 50.0
//!
//! [[categories]]
//! name = "crushed_1"
//! percentage = 50.0
//! ```

use std::fs;
use std::path::Path;

use recyclable_domain::service::{CaptureRequest, CategoryShare};
use recyclable_types::{ConfigError, Error, Result};
use serde::Deserialize;

/// Parsed capture plan file
#[derive(Debug, Clone, Deserialize)]
pub struct CapturePlanFile {
    /// Number of images to capture; may be overridden on the command line
    #[serde(default)]
    pub total: Option<u32>,
    pub categories: Vec<CategoryShare>,
}

impl CapturePlanFile {
    /// Load a capture plan from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read capture plan {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load a capture plan from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse capture plan TOML: {}",
                e
            )))
        })
    }

    /// Validate into an allocation request; `total` overrides the file's total
    pub fn to_request(&self, total: Option<u32>) -> Result<CaptureRequest> {
        let total = total.or(self.total).unwrap_or(0);
        Ok(CaptureRequest::new(self.categories.clone(), total)?)
    }
}
