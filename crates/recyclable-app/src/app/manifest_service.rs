//! Manifest Service - builds and exports classification manifests
//!
//! Reads every stored container and image, classifies them with the domain
//! services and writes the result as pretty JSON. Files are written through a
//! temporary sibling and renamed into place, so a failed export never leaves a
//! half-written manifest behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use recyclable_domain::model::{DepositClass, Jurisdiction};
use recyclable_domain::repository::{ContainerRepository, ImageRepository};
use recyclable_domain::service::{
    build_deposit_manifest, build_size_manifest, classify_deposit_image, pair_with_containers,
    DepositManifest, SizeManifest,
};
use recyclable_types::Result;
use serde::Serialize;
use tracing::{debug, info};

/// Which manifest to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Deposit,
    Size(Jurisdiction),
}

/// One image with its deposit class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedImage {
    pub barcode: Option<String>,
    pub image_sequence_number: u32,
    pub url: String,
    pub class: DepositClass,
}

/// Manifest use cases over a pair of repositories
pub struct ManifestService<'a, C: ?Sized, I: ?Sized> {
    containers: &'a C,
    images: &'a I,
}

impl<'a, C, I> ManifestService<'a, C, I>
where
    C: ContainerRepository + ?Sized,
    I: ImageRepository + ?Sized,
{
    pub fn new(containers: &'a C, images: &'a I) -> Self {
        Self { containers, images }
    }

    /// Deposit manifest over all stored images
    pub fn deposit_manifest(&self) -> Result<DepositManifest> {
        let containers = self.containers.find_all()?;
        let images = self.images.find_all()?;
        debug!(containers = containers.len(), images = images.len(), "building deposit manifest");
        Ok(build_deposit_manifest(pair_with_containers(&images, &containers)))
    }

    /// Size manifest over all stored containers
    pub fn size_manifest(&self, jurisdiction: Jurisdiction) -> Result<SizeManifest> {
        let containers = self.containers.find_all()?;
        let images = self.images.find_all()?;
        debug!(%jurisdiction, containers = containers.len(), "building size manifest");
        Ok(build_size_manifest(&containers, &images, jurisdiction))
    }

    /// Per-image classification, optionally restricted to one container
    pub fn classify(&self, barcode: Option<&str>) -> Result<Vec<ClassifiedImage>> {
        let containers = self.containers.find_all()?;
        let images = match barcode {
            Some(barcode) => self.images.find_by_container(barcode)?,
            None => self.images.find_all()?,
        };

        Ok(pair_with_containers(&images, &containers)
            .into_iter()
            .map(|(image, container)| ClassifiedImage {
                barcode: image.container_barcode.clone(),
                image_sequence_number: image.image_sequence_number,
                url: image.url(),
                class: classify_deposit_image(image, container),
            })
            .collect())
    }

    /// Manifest JSON for `kind`
    pub fn render(&self, kind: ManifestKind) -> Result<String> {
        let json = match kind {
            ManifestKind::Deposit => self.deposit_manifest()?.to_json()?,
            ManifestKind::Size(jurisdiction) => self.size_manifest(jurisdiction)?.to_json()?,
        };
        Ok(json)
    }

    /// Build the manifest and write it to `path`
    pub fn export(&self, kind: ManifestKind, path: &Path) -> Result<()> {
        let json = self.render(kind)?;
        write_atomic(path, json.as_bytes())?;
        info!(path = %path.display(), ?kind, "manifest written");
        Ok(())
    }
}

/// Write `contents` to a temporary sibling of `path`, then rename it into place
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| -> Result<()> {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        writer.write_all(contents)?;
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
