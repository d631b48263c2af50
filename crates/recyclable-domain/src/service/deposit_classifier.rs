//! Deposit classifier
//!
//! Maps one image (and its container, if any) to exactly one
//! [`DepositClass`]. Rules are evaluated in a fixed priority order and the
//! first match wins:
//!
//! 1. no container → `NotClassified`
//! 2. usable image → class by material type
//! 3. invalid orientation → `InvalidBadOrientation`
//! 4. crush degree above 1 → crushed class by material type
//! 5. anything else → `NotClassified`
//!
//! The validity gate must run before the crush rule, otherwise one image
//! could satisfy several rules. Unhandled combinations are logged and
//! degrade to `NotClassified`; classification never fails.

use tracing::error;

use crate::model::{Container, DepositClass, Image, MaterialType};
use crate::service::image_validity::{is_valid_container_image, MAX_VALID_CRUSH_DEGREE};

/// Classify a single image
pub fn classify_deposit_image(image: &Image, container: Option<&Container>) -> DepositClass {
    let Some(container) = container else {
        error!(image = %image, "image has no container");
        return DepositClass::NotClassified;
    };

    if is_valid_container_image(image) {
        if let Some(class) = valid_material_class(container.material_type) {
            return class;
        }
        error!(
            image = %image,
            material_type = %container.material_type,
            "unhandled material_type for valid image"
        );
    }

    if !image.valid_orientation {
        return DepositClass::InvalidBadOrientation;
    }

    if image.crush_degree > MAX_VALID_CRUSH_DEGREE {
        if let Some(class) = crushed_material_class(container.material_type) {
            return class;
        }
    }

    // TODO: aerosol, candy, liquor, jars, dairy/protein, no-label and
    // small-probiotic rules need product-level definitions before they can
    // be ordered against the rules above.
    error!(image = %image, crush_degree = image.crush_degree, "unhandled image");
    DepositClass::NotClassified
}

fn valid_material_class(material_type: MaterialType) -> Option<DepositClass> {
    match material_type {
        MaterialType::Aluminum => Some(DepositClass::Alu),
        MaterialType::Glass => Some(DepositClass::Glass),
        MaterialType::Plastic => Some(DepositClass::Pet),
        MaterialType::Bimetal => Some(DepositClass::InvalidBimetal),
        MaterialType::Cardboard
        | MaterialType::FoilLaminate
        | MaterialType::Paper
        | MaterialType::Other
        | MaterialType::Unknown => Some(DepositClass::InvalidRest),
        MaterialType::Organic => None,
    }
}

fn crushed_material_class(material_type: MaterialType) -> Option<DepositClass> {
    match material_type {
        MaterialType::Aluminum => Some(DepositClass::InvalidCrushedAlu),
        MaterialType::Plastic => Some(DepositClass::InvalidCrushedPet),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlasticCode, StorageConfig};

    fn container(material_type: MaterialType) -> Container {
        let code = if material_type == MaterialType::Plastic {
            PlasticCode::Pet
        } else {
            PlasticCode::Na
        };
        Container::new("0001", material_type, code)
    }

    fn image(crush_degree: i32, valid_orientation: bool) -> Image {
        let location = StorageConfig::default().location("images/0001/a.png");
        Image::new(Some("0001".to_string()), "etag", location, crush_degree, valid_orientation)
    }

    fn classify(material_type: MaterialType, crush_degree: i32, valid_orientation: bool) -> DepositClass {
        classify_deposit_image(&image(crush_degree, valid_orientation), Some(&container(material_type)))
    }

    // ==========================================
    // Valid images
    // ==========================================

    #[test]
    fn test_valid_material_classes() {
        assert_eq!(classify(MaterialType::Aluminum, 0, true), DepositClass::Alu);
        assert_eq!(classify(MaterialType::Glass, 0, true), DepositClass::Glass);
        assert_eq!(classify(MaterialType::Plastic, 1, true), DepositClass::Pet);
        assert_eq!(classify(MaterialType::Bimetal, 0, true), DepositClass::InvalidBimetal);
    }

    #[test]
    fn test_rest_materials() {
        for material in [
            MaterialType::Cardboard,
            MaterialType::FoilLaminate,
            MaterialType::Paper,
            MaterialType::Other,
            MaterialType::Unknown,
        ] {
            assert_eq!(classify(material, 0, true), DepositClass::InvalidRest, "{material}");
        }
    }

    #[test]
    fn test_organic_falls_through_to_not_classified() {
        assert_eq!(classify(MaterialType::Organic, 0, true), DepositClass::NotClassified);
    }

    // ==========================================
    // Priority order
    // ==========================================

    #[test]
    fn test_orphan_image() {
        assert_eq!(classify_deposit_image(&image(0, true), None), DepositClass::NotClassified);
    }

    #[test]
    fn test_bad_orientation_dominates_material() {
        assert_eq!(
            classify(MaterialType::Aluminum, 0, false),
            DepositClass::InvalidBadOrientation
        );
    }

    #[test]
    fn test_bad_orientation_dominates_crush() {
        assert_eq!(
            classify(MaterialType::Aluminum, 3, false),
            DepositClass::InvalidBadOrientation
        );
        assert_eq!(
            classify(MaterialType::Organic, 0, false),
            DepositClass::InvalidBadOrientation
        );
    }

    #[test]
    fn test_crush_boundary() {
        assert_eq!(classify(MaterialType::Aluminum, 1, true), DepositClass::Alu);
        assert_eq!(classify(MaterialType::Aluminum, 2, true), DepositClass::InvalidCrushedAlu);
        assert_eq!(classify(MaterialType::Plastic, 4, true), DepositClass::InvalidCrushedPet);
    }

    #[test]
    fn test_crushed_unhandled_materials() {
        assert_eq!(classify(MaterialType::Glass, 2, true), DepositClass::NotClassified);
        assert_eq!(classify(MaterialType::Bimetal, 3, true), DepositClass::NotClassified);
    }

    #[test]
    fn test_hidden_crush_degree_not_classified() {
        assert_eq!(classify(MaterialType::Aluminum, -1, true), DepositClass::NotClassified);
    }
}
