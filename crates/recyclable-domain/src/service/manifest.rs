//! Deposit manifest: image URLs grouped by deposit class

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{Container, DepositClass, Image};
use crate::service::deposit_classifier::classify_deposit_image;

/// URL lists keyed by deposit class
///
/// Every class is always present, even with no images, and keys serialize in
/// enumeration order. Each classified image lands in exactly one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepositManifest {
    buckets: BTreeMap<DepositClass, Vec<String>>,
}

impl Default for DepositManifest {
    fn default() -> Self {
        Self {
            buckets: DepositClass::ALL.iter().map(|class| (*class, Vec::new())).collect(),
        }
    }
}

impl DepositManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a URL to one class bucket
    pub fn push(&mut self, class: DepositClass, url: String) {
        self.buckets.entry(class).or_default().push(url);
    }

    /// URLs of one class, in insertion order
    pub fn urls(&self, class: DepositClass) -> &[String] {
        self.buckets.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(class, urls)` pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (DepositClass, &[String])> {
        self.buckets.iter().map(|(class, urls)| (*class, urls.as_slice()))
    }

    /// Number of classified images
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Classify every image and group its URL under the resulting class
pub fn build_deposit_manifest<'a, I>(pairs: I) -> DepositManifest
where
    I: IntoIterator<Item = (&'a Image, Option<&'a Container>)>,
{
    let mut manifest = DepositManifest::new();
    for (image, container) in pairs {
        let class = classify_deposit_image(image, container);
        manifest.push(class, image.url());
    }
    manifest
}

/// Resolve each image's container by barcode, preserving image order
pub fn pair_with_containers<'a>(
    images: &'a [Image],
    containers: &'a [Container],
) -> Vec<(&'a Image, Option<&'a Container>)> {
    let by_barcode: HashMap<&str, &Container> =
        containers.iter().map(|c| (c.barcode.as_str(), c)).collect();
    images
        .iter()
        .map(|image| {
            let container = image
                .container_barcode
                .as_deref()
                .and_then(|barcode| by_barcode.get(barcode).copied());
            (image, container)
        })
        .collect()
}
