//! Size manifest for redeemable containers

use serde::{Deserialize, Serialize};

use crate::model::{Container, Image, Jurisdiction, MaterialType, VisualVolume};
use crate::service::image_validity::is_valid_container_image;

/// Materials eligible for the size manifest
pub const SIZED_MATERIALS: [MaterialType; 3] =
    [MaterialType::Aluminum, MaterialType::Glass, MaterialType::Plastic];

/// Image URLs bucketed by annotated container size
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeManifest {
    pub lt24oz: Vec<String>,
    pub gte24oz: Vec<String>,
}

impl SizeManifest {
    pub fn total(&self) -> usize {
        self.lt24oz.len() + self.gte24oz.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Bucket usable images of containers redeemable in `jurisdiction` by visual volume.
///
/// Containers whose visual volume is neither `LT_24_OZ` nor `GT_24_OZ`
/// contribute nothing.
pub fn build_size_manifest(
    containers: &[Container],
    images: &[Image],
    jurisdiction: Jurisdiction,
) -> SizeManifest {
    let mut manifest = SizeManifest::default();

    let eligible = containers.iter().filter(|c| {
        c.is_redeemable_in(jurisdiction) && SIZED_MATERIALS.contains(&c.material_type)
    });
    for container in eligible {
        let bucket = match container.visual_volume {
            VisualVolume::Lt24Oz => &mut manifest.lt24oz,
            VisualVolume::Gt24Oz => &mut manifest.gte24oz,
            VisualVolume::Na | VisualVolume::Small => continue,
        };
        bucket.extend(
            images
                .iter()
                .filter(|img| img.belongs_to(&container.barcode) && is_valid_container_image(img))
                .map(Image::url),
        );
    }

    manifest
}
