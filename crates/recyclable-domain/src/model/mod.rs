//! Domain model types

/// Declares a closed choice set with a stable wire string per variant.
///
/// Generates `ALL`, `as_str`, `Display` and a case-insensitive `FromStr`
/// that reports [`recyclable_types::Error::UnknownChoice`].
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($field:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire string used in storage, CSV and JSON.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = recyclable_types::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| recyclable_types::Error::UnknownChoice {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

pub mod attributes;
pub mod container;
pub mod deposit_class;
pub mod image;
pub mod storage;

pub use attributes::{
    AlcoholicDrinksType, Answer, BeverageType, Contents, MaterialColor, Ribbed, Ringed, Rigidity, Shape,
    WineBottleShape, WineType,
};
pub use container::{Container, Jurisdiction, LiquidVolumeUnit, MaterialType, PlasticCode, VisualVolume, UNMEASURED};
pub use deposit_class::{ContainerSize, DepositClass};
pub use image::{
    ContainerCount, HandsInImage, Image, ImageQuality, LabelType, LidCap, Orientation, DATABASE_VERSION,
    NO_LABEL_CRUSH_DEGREE, UNKNOWN_TEXT,
};
pub use storage::{object_url, StorageConfig, StorageLocation};
