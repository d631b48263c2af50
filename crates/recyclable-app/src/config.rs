//! Configuration management for the recyclable catalog
//!
//! Config stored at: ~/.config/recyclable-catalog/config.json

use std::fs;
use std::path::{Path, PathBuf};

use recyclable_domain::model::{Jurisdiction, StorageConfig};
use recyclable_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "recyclable-catalog";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Store directory override (containers.json / images.json)
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Object storage that new captures are written to
    #[serde(default)]
    pub storage: StorageConfig,

    /// Jurisdiction used for the size manifest
    #[serde(default = "default_size_jurisdiction")]
    pub size_jurisdiction: Jurisdiction,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_size_jurisdiction() -> Jurisdiction {
    Jurisdiction::Ca
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            storage: StorageConfig::default(),
            size_jurisdiction: default_size_jurisdiction(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NotFound)?.join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the store directory path
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let store_dir = dirs::data_dir().ok_or(ConfigError::NotFound)?.join(APP_DIR);
        Ok(store_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)).into())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Recyclable Catalog Configuration")?;
        writeln!(f, "================================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Store dir:         {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Bucket:            {}", self.storage.bucket_name)?;
        writeln!(f, "Region:            {}", self.storage.region_name)?;
        writeln!(f, "Size jurisdiction: {}", self.size_jurisdiction)?;
        writeln!(f, "Output format:     {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:       {}", path.display())?;
        }

        Ok(())
    }
}
