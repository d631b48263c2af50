//! Domain services

pub mod capture_allocator;
pub mod capture_plan;
pub mod cumulative;
pub mod deposit_classifier;
pub mod image_validity;
pub mod manifest;
pub mod size_classifier;
pub mod unit_conversion;

pub use capture_allocator::{
    allocate_capture_counts, category_for_sequence_position, CaptureRequest, CategoryCount,
    CategoryShare, UNKNOWN_CATEGORY,
};
pub use capture_plan::{
    in_capture_order, object_key, CaptureAttributes, CapturePlan, CaptureSlot, DEFAULT_CATEGORY_ORDER,
};
pub use deposit_classifier::classify_deposit_image;
pub use image_validity::is_valid_container_image;
pub use manifest::{build_deposit_manifest, pair_with_containers, DepositManifest};
pub use size_classifier::{build_size_manifest, SizeManifest};
pub use unit_conversion::{classify_size, to_fluid_ounces};
