//! Container (barcode-identified product packaging) type definitions

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use recyclable_types::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::model::attributes::{
    AlcoholicDrinksType, Answer, BeverageType, Contents, MaterialColor, Ribbed, Ringed, Rigidity, Shape,
    WineBottleShape, WineType,
};
use crate::model::ContainerSize;
use crate::service::unit_conversion::classify_size;

choice_enum! {
    /// Packaging material of a container
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum MaterialType ("material_type") {
        Aluminum => "alu",
        Bimetal => "bimetal",
        Cardboard => "cardboard",
        FoilLaminate => "FOIL_LAMINATE",
        Glass => "glass",
        Paper => "paper",
        Organic => "organic",
        Plastic => "plastic",
        Other => "other",
        Unknown => "unknown",
    }
}

choice_enum! {
    /// Resin identification code for plastic containers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum PlasticCode ("plastic_code") {
        Pet => "1_pet",
        Hdpe => "2_hdpe",
        Pvc => "3_pvc",
        Ldpe => "4_ldpe",
        Pp => "5_pp",
        Ps => "6_ps",
        Other => "7_o",
        Na => "NA",
        Unknown => "unknown",
    }
}

choice_enum! {
    /// Size bucket assigned by a human annotator
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum VisualVolume ("visual_volume") {
        #[default]
        Na => "NA",
        Small => "small",
        Lt24Oz => "LT_24_OZ",
        Gt24Oz => "GT_24_OZ",
    }
}

choice_enum! {
    /// Deposit-return jurisdiction with a redeemability flag per container
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub enum Jurisdiction ("jurisdiction") {
        Ca => "ca",
        Ct => "ct",
        Gu => "gu",
        Hi => "hi",
        Ia => "ia",
        Me => "me",
        Ma => "ma",
        Mi => "mi",
        Ny => "ny",
        Or => "or",
        Vt => "vt",
    }
}

/// Unit of the printed liquid volume
///
/// Parsing is strict: an unrecognized unit is a schema defect and yields
/// [`Error::UnknownVolumeUnit`] instead of a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiquidVolumeUnit {
    #[serde(rename = "OZ")]
    Oz,
    #[serde(rename = "ML")]
    Ml,
    #[serde(rename = "LITER")]
    Liter,
    #[serde(rename = "NA")]
    Na,
    #[serde(rename = "unknown")]
    Unknown,
}

impl LiquidVolumeUnit {
    pub const ALL: &'static [LiquidVolumeUnit] = &[
        LiquidVolumeUnit::Oz,
        LiquidVolumeUnit::Ml,
        LiquidVolumeUnit::Liter,
        LiquidVolumeUnit::Na,
        LiquidVolumeUnit::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LiquidVolumeUnit::Oz => "OZ",
            LiquidVolumeUnit::Ml => "ML",
            LiquidVolumeUnit::Liter => "LITER",
            LiquidVolumeUnit::Na => "NA",
            LiquidVolumeUnit::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LiquidVolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiquidVolumeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownVolumeUnit(s.to_string()))
    }
}

/// Sentinel for numeric container attributes that were never measured
pub const UNMEASURED: f64 = -1.0;

fn unmeasured() -> f64 {
    UNMEASURED
}

fn default_made_in() -> String {
    "UNK".to_string()
}

fn not_alcoholic() -> Answer {
    Answer::No
}

/// A catalogued container, identified by its barcode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Unique product barcode
    pub barcode: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub product_name: String,
    pub material_type: MaterialType,
    pub plastic_code: PlasticCode,
    #[serde(default)]
    pub rigidity: Rigidity,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub content_type: Contents,
    #[serde(default)]
    pub hazardous: Answer,
    #[serde(default)]
    pub beverage_type: BeverageType,
    /// Alcohol by volume in percent, `-1.0` when unknown
    #[serde(default = "unmeasured")]
    pub alcohol_percentage: f64,
    #[serde(default = "not_alcoholic")]
    pub alcoholic: Answer,
    #[serde(default)]
    pub alcoholic_drinks_type: AlcoholicDrinksType,
    #[serde(default)]
    pub wine_bottle_shape: WineBottleShape,
    #[serde(default)]
    pub wine_type: WineType,
    /// Printed volume, `-1.0` when unknown
    #[serde(default = "unmeasured")]
    pub liquid_volume: f64,
    pub liquid_volume_unit: LiquidVolumeUnit,
    /// Empty container mass in grams, `-1.0` when unknown
    #[serde(default = "unmeasured")]
    pub mass_gram: f64,
    #[serde(default)]
    pub visual_volume: VisualVolume,
    /// Jurisdictions in which the container is redeemable for a deposit
    #[serde(default)]
    pub redeemable_in: BTreeSet<Jurisdiction>,
    /// Juice content in percent, `-1.0` when unknown
    #[serde(default = "unmeasured")]
    pub juice_percentage: f64,
    #[serde(default)]
    pub material_color: MaterialColor,
    #[serde(default)]
    pub ribbed: Ribbed,
    #[serde(default)]
    pub ringed: Ringed,
    /// Three-letter country code of manufacture
    #[serde(default = "default_made_in")]
    pub made_in: String,
}

impl Container {
    pub fn new(barcode: impl Into<String>, material_type: MaterialType, plastic_code: PlasticCode) -> Self {
        Self {
            barcode: barcode.into(),
            brand: String::new(),
            product_name: String::new(),
            material_type,
            plastic_code,
            rigidity: Rigidity::default(),
            shape: Shape::default(),
            content_type: Contents::default(),
            hazardous: Answer::Unknown,
            beverage_type: BeverageType::default(),
            alcohol_percentage: UNMEASURED,
            alcoholic: not_alcoholic(),
            alcoholic_drinks_type: AlcoholicDrinksType::default(),
            wine_bottle_shape: WineBottleShape::default(),
            wine_type: WineType::default(),
            liquid_volume: UNMEASURED,
            liquid_volume_unit: LiquidVolumeUnit::Na,
            mass_gram: UNMEASURED,
            visual_volume: VisualVolume::Na,
            redeemable_in: BTreeSet::new(),
            juice_percentage: UNMEASURED,
            material_color: MaterialColor::default(),
            ribbed: Ribbed::default(),
            ringed: Ringed::default(),
            made_in: default_made_in(),
        }
    }

    pub fn with_product(mut self, brand: impl Into<String>, product_name: impl Into<String>) -> Self {
        self.brand = brand.into();
        self.product_name = product_name.into();
        self
    }

    pub fn with_liquid_volume(mut self, volume: f64, unit: LiquidVolumeUnit) -> Self {
        self.liquid_volume = volume;
        self.liquid_volume_unit = unit;
        self
    }

    pub fn with_visual_volume(mut self, visual_volume: VisualVolume) -> Self {
        self.visual_volume = visual_volume;
        self
    }

    pub fn redeemable_in(mut self, jurisdiction: Jurisdiction) -> Self {
        self.redeemable_in.insert(jurisdiction);
        self
    }

    pub fn is_redeemable_in(&self, jurisdiction: Jurisdiction) -> bool {
        self.redeemable_in.contains(&jurisdiction)
    }

    /// Check record-level invariants, enforced when a container is created
    /// or imported (never by the classifiers).
    pub fn validate(&self) -> Result<()> {
        if self.barcode.trim().is_empty() {
            return Err(Error::InvalidContainer("Barcode must not be empty.".to_string()));
        }
        if self.material_type == MaterialType::Plastic && self.plastic_code == PlasticCode::Na {
            return Err(Error::InvalidContainer(
                "Material type is plastic but the plastic code is NA.".to_string(),
            ));
        }
        Ok(())
    }

    /// Size bucket derived from the printed liquid volume
    pub fn size(&self) -> ContainerSize {
        classify_size(self.liquid_volume, self.liquid_volume_unit)
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Container {} ({} {}, {}, {} {})",
            self.barcode,
            self.brand,
            self.product_name,
            self.material_type,
            self.liquid_volume,
            self.liquid_volume_unit
        )
    }
}
