//! Classification output categories

use serde::{Deserialize, Serialize};

/// Terminal deposit-return category of a captured image
///
/// Every image lands in exactly one class. Several invalid-reason classes
/// (aerosol, candy, liquor, jars, dairy/protein, no-label, small probiotic,
/// bad image, can) exist as manifest keys but have no rule assigning them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositClass {
    Alu,
    Glass,
    Pet,
    InvalidAerosol,
    InvalidBadImage,
    InvalidBadOrientation,
    InvalidBimetal,
    InvalidCan,
    InvalidCandy,
    InvalidCrushedAlu,
    InvalidCrushedPet,
    InvalidDairyProtein,
    InvalidJars,
    InvalidLiquor,
    InvalidNoLabelRest,
    InvalidRest,
    InvalidSmallProbioticRest,
    LiquorGlass,
    LiquorPet,
    NoLabelPet,
    NotClassified,
}

impl DepositClass {
    /// Every class, in manifest order.
    pub const ALL: [DepositClass; 21] = [
        DepositClass::Alu,
        DepositClass::Glass,
        DepositClass::Pet,
        DepositClass::InvalidAerosol,
        DepositClass::InvalidBadImage,
        DepositClass::InvalidBadOrientation,
        DepositClass::InvalidBimetal,
        DepositClass::InvalidCan,
        DepositClass::InvalidCandy,
        DepositClass::InvalidCrushedAlu,
        DepositClass::InvalidCrushedPet,
        DepositClass::InvalidDairyProtein,
        DepositClass::InvalidJars,
        DepositClass::InvalidLiquor,
        DepositClass::InvalidNoLabelRest,
        DepositClass::InvalidRest,
        DepositClass::InvalidSmallProbioticRest,
        DepositClass::LiquorGlass,
        DepositClass::LiquorPet,
        DepositClass::NoLabelPet,
        DepositClass::NotClassified,
    ];

    /// Manifest key
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositClass::Alu => "alu",
            DepositClass::Glass => "glass",
            DepositClass::Pet => "pet",
            DepositClass::InvalidAerosol => "invalid_aerosol",
            DepositClass::InvalidBadImage => "invalid_bad_image",
            DepositClass::InvalidBadOrientation => "invalid_bad_orientation",
            DepositClass::InvalidBimetal => "invalid_bimetal",
            DepositClass::InvalidCan => "invalid_can",
            DepositClass::InvalidCandy => "invalid_candy",
            DepositClass::InvalidCrushedAlu => "invalid_crushed_alu",
            DepositClass::InvalidCrushedPet => "invalid_crushed_pet",
            DepositClass::InvalidDairyProtein => "invalid_dairy_protein",
            DepositClass::InvalidJars => "invalid_jars",
            DepositClass::InvalidLiquor => "invalid_liquor",
            DepositClass::InvalidNoLabelRest => "invalid_no_label_rest",
            DepositClass::InvalidRest => "invalid_rest",
            DepositClass::InvalidSmallProbioticRest => "invalid_small_probiotic_rest",
            DepositClass::LiquorGlass => "liquor_glass",
            DepositClass::LiquorPet => "liquor_pet",
            DepositClass::NoLabelPet => "no_label_pet",
            DepositClass::NotClassified => "not_classified",
        }
    }

    /// Position of the class in [`DepositClass::ALL`]
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for DepositClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size bucket derived from the printed liquid volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerSize {
    #[serde(rename = "LT_24_OZ")]
    Lt24Oz,
    #[serde(rename = "GTE_24_OZ")]
    Gte24Oz,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}
