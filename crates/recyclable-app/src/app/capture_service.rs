//! Capture Service - records the images of a capture batch
//!
//! A batch is planned from category percentages, then each photographed
//! position is recorded as an Image whose attributes come from the category
//! of that position. The frame bytes go to the object store under the image's
//! object key before the image is saved, and are removed again when the save
//! fails.

use chrono::{NaiveDateTime, Utc};
use recyclable_domain::model::{Image, StorageConfig};
use recyclable_domain::repository::{ContainerRepository, ImageRepository, ObjectStore};
use recyclable_domain::service::{object_key, CapturePlan, CaptureRequest};
use recyclable_types::{AllocationError, Error};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors specific to the capture service
#[derive(Debug, Error)]
pub enum CaptureServiceError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Invalid capture request: {0}")]
    InvalidRequest(#[from] AllocationError),

    #[error("Position {position} is outside the capture plan (1..={total})")]
    PositionOutOfRange { position: u32, total: u32 },

    #[error("Store error: {0}")]
    StoreError(String),
}

impl From<Error> for CaptureServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::Allocation(e) => CaptureServiceError::InvalidRequest(e),
            _ => CaptureServiceError::StoreError(err.to_string()),
        }
    }
}

/// Options for recording one capture
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    /// Entity tag returned by the upload; generated when absent
    pub entity_tag: Option<String>,

    /// Capture time; now when absent
    pub timestamp: Option<NaiveDateTime>,

    pub deposit_id: Option<String>,

    pub cube_sn: Option<String>,
}

impl CaptureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity_tag(mut self, tag: impl Into<String>) -> Self {
        self.entity_tag = Some(tag.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_deposit_id(mut self, deposit_id: impl Into<String>) -> Self {
        self.deposit_id = Some(deposit_id.into());
        self
    }

    pub fn with_cube_sn(mut self, cube_sn: impl Into<String>) -> Self {
        self.cube_sn = Some(cube_sn.into());
        self
    }
}

/// Capture use cases over the repositories and the object store
pub struct CaptureService<'a, C: ?Sized, I: ?Sized, O: ?Sized> {
    containers: &'a C,
    images: &'a I,
    objects: &'a O,
    storage: StorageConfig,
}

impl<'a, C, I, O> CaptureService<'a, C, I, O>
where
    C: ContainerRepository + ?Sized,
    I: ImageRepository + ?Sized,
    O: ObjectStore + ?Sized,
{
    pub fn new(containers: &'a C, images: &'a I, objects: &'a O, storage: StorageConfig) -> Self {
        Self {
            containers,
            images,
            objects,
            storage,
        }
    }

    /// Allocate a batch for an existing container
    pub fn plan(&self, barcode: &str, request: &CaptureRequest) -> Result<CapturePlan, CaptureServiceError> {
        if self.containers.find_by_barcode(barcode)?.is_none() {
            return Err(CaptureServiceError::ContainerNotFound(barcode.to_string()));
        }
        Ok(CapturePlan::new(barcode, request))
    }

    /// Store `frame` and record it as the image taken at `position` of `plan`
    pub fn record(
        &self,
        plan: &CapturePlan,
        position: u32,
        frame: &[u8],
        options: CaptureOptions,
    ) -> Result<Image, CaptureServiceError> {
        let slot = plan.slot(position).ok_or(CaptureServiceError::PositionOutOfRange {
            position,
            total: plan.total(),
        })?;

        let timestamp = options.timestamp.unwrap_or_else(|| Utc::now().naive_utc());
        let location = self.storage.location(object_key(&plan.barcode, timestamp));
        let entity_tag = options
            .entity_tag
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        let attrs = slot.attributes;
        let mut image = Image::new(
            Some(plan.barcode.clone()),
            entity_tag,
            location,
            attrs.crush_degree,
            attrs.valid_orientation,
        );
        image.orientation_style = attrs.orientation_style;
        image.label = attrs.label;
        image.timestamp = Some(timestamp);
        image.deposit_id = options.deposit_id.unwrap_or_default();
        if let Some(cube_sn) = options.cube_sn {
            image.cube_sn = cube_sn;
        }

        let key = image.location.object_key.clone();
        self.objects.put(&key, frame)?;
        image.image_sequence_number = match self.images.save(&image) {
            Ok(sequence) => sequence,
            Err(e) => {
                if let Err(cleanup) = self.objects.remove(&key) {
                    warn!(key = %key, error = %cleanup, "orphaned object left behind");
                }
                return Err(e.into());
            }
        };
        info!(
            barcode = %plan.barcode,
            position,
            category = %slot.category,
            sequence = image.image_sequence_number,
            bytes = frame.len(),
            "capture recorded"
        );
        Ok(image)
    }
}
