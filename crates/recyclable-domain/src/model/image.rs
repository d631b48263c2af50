//! Captured image type definitions

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::StorageLocation;

/// Crush degree recorded when the container state is not visible
pub const NO_LABEL_CRUSH_DEGREE: i32 = -1;

choice_enum! {
    /// Which labels are visible on the container
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum LabelType ("label") {
        NeckOnly => "neck_only",
        #[default]
        BodyOnly => "body_only",
        Neither => "neither",
        NeckAndBody => "neck_and_body",
    }
}

choice_enum! {
    /// How the container lies in the frame
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Orientation ("orientation_style") {
        #[default]
        Unknown => "unknown",
        StandingUp => "standing_up",
        Leaning => "leaning",
        Orthogonal => "orthogonal",
        Parallel => "parallel",
    }
}

choice_enum! {
    /// Annotated quality of the capture itself
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum ImageQuality ("image_quality") {
        #[default]
        ValidImage => "valid_image",
        InvalidImage => "invalid_image",
        UnknownImage => "unknown_image",
        PartiallyShown => "partially_shown",
        BlurryMovingBelt => "blurry_moving_belt",
        OutOfFocus => "out_of_focus",
        BadLighting => "bad_lighting",
        BlurryMovingContainer => "blurry_moving_container",
    }
}

choice_enum! {
    /// Whether the lid or cap is on
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum LidCap ("lid_cap") {
        #[default]
        Unknown => "unknown",
        On => "true",
        Off => "false",
    }
}

choice_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum HandsInImage ("hands_in_image") {
        #[default]
        NoHands => "no_hands",
        Hands => "hands",
        BlurryHandsIn => "blurry_hands_in",
        BlurryHandsOut => "blurry_hands_out",
    }
}

choice_enum! {
    /// How many containers are in the frame
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum ContainerCount ("count") {
        Empty => "empty",
        #[default]
        Solo => "solo",
        Multiple => "multiple",
    }
}

/// Placeholder for capture metadata nobody supplied
pub const UNKNOWN_TEXT: &str = "unknown";

/// Record layout version written for new images
pub const DATABASE_VERSION: u32 = 1;

fn unknown_dimension() -> f64 {
    -1.0
}

fn unknown_text() -> String {
    UNKNOWN_TEXT.to_string()
}

fn database_version() -> u32 {
    DATABASE_VERSION
}

/// A captured image of a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Barcode of the pictured container; `None` for orphaned images
    pub container_barcode: Option<String>,
    /// Identifier assigned by the capturing device
    #[serde(default)]
    pub image_id: String,
    /// 1-based position among the container's images
    #[serde(default)]
    pub image_sequence_number: u32,
    /// Entity tag returned by object storage (unique)
    pub aws_entity_tag: String,
    pub location: StorageLocation,
    #[serde(default)]
    pub lid_cap: LidCap,
    /// 0 = pristine, higher = more crushed, -1 = not visible
    pub crush_degree: i32,
    pub valid_orientation: bool,
    #[serde(default)]
    pub orientation_style: Orientation,
    #[serde(default)]
    pub label: LabelType,
    #[serde(default)]
    pub image_quality: ImageQuality,
    #[serde(default = "unknown_dimension")]
    pub image_width: f64,
    #[serde(default = "unknown_dimension")]
    pub image_height: f64,
    #[serde(default)]
    pub deposit_id: String,
    #[serde(default)]
    pub cube_sn: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl Image {
    pub fn new(
        container_barcode: Option<String>,
        aws_entity_tag: impl Into<String>,
        location: StorageLocation,
        crush_degree: i32,
        valid_orientation: bool,
    ) -> Self {
        Self {
            container_barcode,
            image_id: String::new(),
            image_sequence_number: 0,
            aws_entity_tag: aws_entity_tag.into(),
            location,
            lid_cap: LidCap::Unknown,
            crush_degree,
            valid_orientation,
            orientation_style: Orientation::Unknown,
            label: LabelType::BodyOnly,
            image_quality: ImageQuality::ValidImage,
            container_in_frame: None,
            image_width: unknown_dimension(),
            image_height: unknown_dimension(),
            hands_in_image: HandsInImage::NoHands,
            count: ContainerCount::Solo,
            imager_version: unknown_text(),
            deposit_id: String::new(),
            company_name: unknown_text(),
            store_name: unknown_text(),
            cube_sn: unknown_text(),
            timestamp: None,
            database_version: DATABASE_VERSION,
        }
    }

    /// Publicly fetchable URL of the image
    pub fn url(&self) -> String {
        self.location.url()
    }

    pub fn belongs_to(&self, barcode: &str) -> bool {
        self.container_barcode.as_deref() == Some(barcode)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Image {})",
            self.container_barcode.as_deref().unwrap_or("Unknown"),
            self.image_sequence_number
        )
    }
}
