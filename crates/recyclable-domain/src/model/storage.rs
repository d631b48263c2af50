//! Object-storage locations of captured images

use recyclable_types::{Error, Result};
use serde::{Deserialize, Serialize};

/// Bucket and region that new captures are written to
///
/// Passed explicitly to whatever records captures; there is no process-wide
/// storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub bucket_name: String,
    pub region_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_name: "recyclable-images".to_string(),
            region_name: "us-west-2".to_string(),
        }
    }
}

impl StorageConfig {
    /// Location of `object_key` inside the configured bucket
    pub fn location(&self, object_key: impl Into<String>) -> StorageLocation {
        StorageLocation {
            bucket_name: self.bucket_name.clone(),
            region_name: self.region_name.clone(),
            object_key: object_key.into(),
        }
    }
}

/// Where an image object lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocation {
    pub bucket_name: String,
    pub region_name: String,
    pub object_key: String,
}

impl StorageLocation {
    /// Publicly fetchable URL of the object
    pub fn url(&self) -> String {
        object_url(&self.bucket_name, &self.region_name, &self.object_key)
    }

    /// Parse `https://{bucket}.s3.{region}.amazonaws.com/{key}`
    pub fn from_object_url(url: &str) -> Result<Self> {
        let invalid = || Error::InvalidObjectUrl(url.to_string());

        let (_, without_scheme) = url.split_once("//").ok_or_else(invalid)?;
        let (host, _) = without_scheme.split_once('/').ok_or_else(invalid)?;
        let labels: Vec<&str> = host.split('.').collect();
        let (bucket_name, region_name) = match labels.as_slice() {
            [bucket, "s3", region, ..] if !bucket.is_empty() && !region.is_empty() => {
                (bucket.to_string(), region.to_string())
            }
            _ => return Err(invalid()),
        };
        let (_, object_key) = without_scheme
            .split_once("amazonaws.com/")
            .ok_or_else(invalid)?;
        if object_key.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            bucket_name,
            region_name,
            object_key: object_key.to_string(),
        })
    }
}

/// Build the public URL for an object; spaces in the key become `+`
pub fn object_url(bucket_name: &str, region_name: &str, object_key: &str) -> String {
    format!(
        "https://{}.s3.{}.amazonaws.com/{}",
        bucket_name,
        region_name,
        object_key.replace(' ', "+")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "containerimages/995/UNKNOWN-MINI_SNICKERS_BAR-200ML-0G-/VALID/995_2023-05-12-15-13-04.jpg";

    #[test]
    fn test_location_from_object_url() {
        let url = format!("https://recyclable-images.s3.us-west-2.amazonaws.com/{KEY}");
        let loc = StorageLocation::from_object_url(&url).unwrap();
        assert_eq!(loc.bucket_name, "recyclable-images");
        assert_eq!(loc.region_name, "us-west-2");
        assert_eq!(loc.object_key, KEY);
        assert_eq!(loc.url(), url);
    }

    #[test]
    fn test_spaces_become_pluses() {
        let url = object_url("bucket", "eu-west-1", "images/12 34/a b.png");
        assert_eq!(url, "https://bucket.s3.eu-west-1.amazonaws.com/images/12+34/a+b.png");
    }

    #[test]
    fn test_malformed_urls_rejected() {
        assert!(StorageLocation::from_object_url("not a url").is_err());
        assert!(StorageLocation::from_object_url("https://example.com/a.png").is_err());
        assert!(StorageLocation::from_object_url("https://b.s3.r.amazonaws.com/").is_err());
    }

    #[test]
    fn test_config_location() {
        let config = StorageConfig::default();
        let loc = config.location("images/1/1_x.png");
        assert_eq!(
            loc.url(),
            "https://recyclable-images.s3.us-west-2.amazonaws.com/images/1/1_x.png"
        );
    }
}
