//! Capture plan: which category, and which image attributes, each position of
//! a capture batch gets.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::{LabelType, Orientation, NO_LABEL_CRUSH_DEGREE};
use crate::service::capture_allocator::{CaptureRequest, CategoryCount, CategoryShare};
use crate::service::cumulative::bucket_at_position;

/// Standard capture categories in the order they are photographed
pub const DEFAULT_CATEGORY_ORDER: [&str; 7] = [
    "valid",
    "bad_orientation",
    "crushed_1",
    "crushed_2",
    "crushed_3",
    "no_label",
    "crushed_4",
];

/// Sort shares into the standard capture order. Custom categories follow the
/// standard ones in the order given.
pub fn in_capture_order(mut shares: Vec<CategoryShare>) -> Vec<CategoryShare> {
    shares.sort_by_key(|share| {
        DEFAULT_CATEGORY_ORDER
            .iter()
            .position(|name| *name == share.name)
            .unwrap_or(DEFAULT_CATEGORY_ORDER.len())
    });
    shares
}

/// Image attributes implied by a capture category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaptureAttributes {
    pub crush_degree: i32,
    pub valid_orientation: bool,
    pub orientation_style: Orientation,
    pub label: LabelType,
}

impl CaptureAttributes {
    pub fn for_category(category: &str) -> Self {
        let crush_degree = match category {
            "valid" => 0,
            _ => category
                .strip_prefix("crushed_")
                .and_then(|n| n.parse::<i32>().ok())
                .filter(|n| (1..=4).contains(n))
                .unwrap_or(NO_LABEL_CRUSH_DEGREE),
        };
        let valid_orientation = category != "bad_orientation";
        let orientation_style = if valid_orientation {
            Orientation::Parallel
        } else {
            Orientation::Unknown
        };
        let label = match category {
            "bad_orientation" | "no_label" | "crushed_4" => LabelType::Neither,
            _ => LabelType::BodyOnly,
        };

        Self {
            crush_degree,
            valid_orientation,
            orientation_style,
            label,
        }
    }
}

/// One position of a capture batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureSlot {
    /// 1-based position in the batch
    pub position: u32,
    pub category: String,
    pub attributes: CaptureAttributes,
}

/// Allocated capture batch for one container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturePlan {
    pub barcode: String,
    pub counts: Vec<CategoryCount>,
}

impl CapturePlan {
    pub fn new(barcode: impl Into<String>, request: &CaptureRequest) -> Self {
        Self {
            barcode: barcode.into(),
            counts: request.allocate(),
        }
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Slot at a 1-based position; `None` outside the batch
    pub fn slot(&self, position: u32) -> Option<CaptureSlot> {
        let category = bucket_at_position(
            self.counts.iter().map(|c| (c.name.as_str(), c.count)),
            position,
        )?;
        Some(CaptureSlot {
            position,
            category: category.to_string(),
            attributes: CaptureAttributes::for_category(category),
        })
    }

    pub fn slots(&self) -> impl Iterator<Item = CaptureSlot> + '_ {
        (1..=self.total()).filter_map(move |position| self.slot(position))
    }
}

/// Object key for a capture: `images/{barcode}/{barcode}_{timestamp}.png`
pub fn object_key(barcode: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "images/{barcode}/{barcode}_{}.png",
        timestamp.format("%Y-%m-%dT%H:%M:%S%.6f")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_category_attributes() {
        let valid = CaptureAttributes::for_category("valid");
        assert_eq!(valid.crush_degree, 0);
        assert!(valid.valid_orientation);
        assert_eq!(valid.orientation_style, Orientation::Parallel);
        assert_eq!(valid.label, LabelType::BodyOnly);

        let bad = CaptureAttributes::for_category("bad_orientation");
        assert_eq!(bad.crush_degree, NO_LABEL_CRUSH_DEGREE);
        assert!(!bad.valid_orientation);
        assert_eq!(bad.orientation_style, Orientation::Unknown);
        assert_eq!(bad.label, LabelType::Neither);

        let crushed = CaptureAttributes::for_category("crushed_3");
        assert_eq!(crushed.crush_degree, 3);
        assert_eq!(crushed.label, LabelType::BodyOnly);

        let flat = CaptureAttributes::for_category("crushed_4");
        assert_eq!(flat.crush_degree, 4);
        assert_eq!(flat.label, LabelType::Neither);

        let no_label = CaptureAttributes::for_category("no_label");
        assert_eq!(no_label.crush_degree, NO_LABEL_CRUSH_DEGREE);
        assert!(no_label.valid_orientation);
        assert_eq!(no_label.label, LabelType::Neither);
    }

    #[test]
    fn test_custom_category_defaults() {
        let attrs = CaptureAttributes::for_category("upside_down");
        assert_eq!(attrs.crush_degree, NO_LABEL_CRUSH_DEGREE);
        assert!(attrs.valid_orientation);
        assert_eq!(attrs.label, LabelType::BodyOnly);
    }

    #[test]
    fn test_crush_degree_only_for_known_levels() {
        for category in ["crushed_0", "crushed_5", "crushed_9", "crushed_-2", "crushed_x"] {
            assert_eq!(
                CaptureAttributes::for_category(category).crush_degree,
                NO_LABEL_CRUSH_DEGREE,
                "{category}"
            );
        }
        assert_eq!(CaptureAttributes::for_category("crushed_1").crush_degree, 1);
    }

    #[test]
    fn test_shares_sorted_into_capture_order() {
        let shares = vec![
            CategoryShare::new("crushed_4", 10.0),
            CategoryShare::new("upside_down", 10.0),
            CategoryShare::new("valid", 50.0),
            CategoryShare::new("side_view", 10.0),
            CategoryShare::new("bad_orientation", 20.0),
        ];
        let names: Vec<String> = in_capture_order(shares).into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["valid", "bad_orientation", "crushed_4", "upside_down", "side_view"]
        );
    }

    #[test]
    fn test_plan_slots_follow_allocation() {
        let request = CaptureRequest::new(
            vec![
                CategoryShare::new("valid", 50.0),
                CategoryShare::new("crushed_1", 25.0),
                CategoryShare::new("crushed_2", 25.0),
            ],
            7,
        )
        .unwrap();
        let plan = CapturePlan::new("0123", &request);
        assert_eq!(plan.total(), 7);

        let categories: Vec<String> = plan.slots().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec!["valid", "valid", "valid", "crushed_1", "crushed_1", "crushed_2", "crushed_2"]
        );
        assert_eq!(plan.slot(5).unwrap().attributes.crush_degree, 1);
        assert!(plan.slot(0).is_none());
        assert!(plan.slot(8).is_none());
    }

    #[test]
    fn test_object_key_format() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(14, 5, 7, 42)
            .unwrap();
        assert_eq!(
            object_key("0123", ts),
            "images/0123/0123_2024-03-09T14:05:07.000042.png"
        );
    }
}
