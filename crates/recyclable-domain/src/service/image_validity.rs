//! Usability gate for captured images

use crate::model::Image;

/// Highest crush degree still considered an intact container
pub const MAX_VALID_CRUSH_DEGREE: i32 = 1;

/// True when the crush degree counts as an intact container (0 or 1)
pub fn is_valid_crush_degree(crush_degree: i32) -> bool {
    (0..=MAX_VALID_CRUSH_DEGREE).contains(&crush_degree)
}

/// An image is usable for material-based classes when the container is
/// correctly oriented and at most lightly crushed.
pub fn is_valid_container_image(image: &Image) -> bool {
    image.valid_orientation && is_valid_crush_degree(image.crush_degree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StorageConfig;

    fn image(crush_degree: i32, valid_orientation: bool) -> Image {
        let location = StorageConfig::default().location("images/1/a.png");
        Image::new(Some("1".to_string()), "etag", location, crush_degree, valid_orientation)
    }

    #[test]
    fn test_crush_degree_range() {
        assert!(is_valid_container_image(&image(0, true)));
        assert!(is_valid_container_image(&image(1, true)));
        assert!(!is_valid_container_image(&image(2, true)));
        assert!(!is_valid_container_image(&image(4, true)));
        assert!(!is_valid_container_image(&image(-1, true)));
    }

    #[test]
    fn test_orientation_required() {
        assert!(!is_valid_container_image(&image(0, false)));
        assert!(!is_valid_container_image(&image(1, false)));
    }
}
