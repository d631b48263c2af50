//! Capture-count allocator
//!
//! Turns category percentages into integer image counts that sum exactly to
//! the requested total (largest-remainder method), and maps a 1-based capture
//! position back to its category.

use std::collections::HashSet;

use recyclable_types::AllocationError;
use serde::{Deserialize, Serialize};

use crate::service::cumulative::bucket_at_position;

/// Allowed deviation of the percentage sum from 100
pub const PERCENTAGE_SUM_TOLERANCE: f64 = 0.01;

/// Category reported for positions outside the allocation
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Requested share of a capture batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub percentage: f64,
}

impl CategoryShare {
    pub fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }
}

/// Allocated number of captures for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u32,
}

/// Allocate `total` captures across `shares`, preserving the input order.
///
/// Preconditions (checked by [`CaptureRequest::new`]): at least one share,
/// `total > 0`, every percentage in `[0, 100]`, and percentages summing to
/// 100 within [`PERCENTAGE_SUM_TOLERANCE`].
///
/// Each category gets `floor(total * pct / 100)`; the leftover units go one
/// each to the categories with the largest fractional remainders, ties going
/// to the earlier category. The counts always sum to `total`.
pub fn allocate_capture_counts(shares: &[CategoryShare], total: u32) -> Vec<CategoryCount> {
    debug_assert!(!shares.is_empty(), "allocation needs at least one category");
    debug_assert!(total > 0, "allocation needs a positive total");
    if shares.is_empty() {
        return Vec::new();
    }

    // Scaling by the actual sum keeps the floors from overshooting `total`
    // when the percentages are within tolerance but above 100.
    let percentage_sum: f64 = shares.iter().map(|s| s.percentage).sum();
    let exact: Vec<f64> = shares
        .iter()
        .map(|s| f64::from(total) * s.percentage / percentage_sum)
        .collect();

    let mut counts: Vec<u32> = exact.iter().map(|e| e.floor() as u32).collect();
    let remainders: Vec<f64> = exact.iter().zip(&counts).map(|(e, c)| e - f64::from(*c)).collect();

    let assigned: u32 = counts.iter().sum();
    let leftover = total.saturating_sub(assigned) as usize;
    debug_assert!(leftover <= shares.len());

    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]));
    for &idx in order.iter().cycle().take(leftover) {
        counts[idx] += 1;
    }

    shares
        .iter()
        .zip(counts)
        .map(|(share, count)| CategoryCount {
            name: share.name.clone(),
            count,
        })
        .collect()
}

/// Category of the capture at 1-based `position`, or [`UNKNOWN_CATEGORY`]
/// when the position lies outside the allocation.
pub fn category_for_sequence_position(counts: &[CategoryCount], position: u32) -> &str {
    bucket_at_position(counts.iter().map(|c| (c.name.as_str(), c.count)), position)
        .unwrap_or(UNKNOWN_CATEGORY)
}

/// A validated allocation request
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    shares: Vec<CategoryShare>,
    total: u32,
}

impl CaptureRequest {
    /// Validate allocator preconditions
    pub fn new(shares: Vec<CategoryShare>, total: u32) -> Result<Self, AllocationError> {
        if shares.is_empty() {
            return Err(AllocationError::NoCategories);
        }
        if total == 0 {
            return Err(AllocationError::NonPositiveTotal);
        }

        let mut names = HashSet::new();
        for share in &shares {
            if !(0.0..=100.0).contains(&share.percentage) {
                return Err(AllocationError::PercentageOutOfRange {
                    category: share.name.clone(),
                    value: share.percentage,
                });
            }
            if !names.insert(share.name.as_str()) {
                return Err(AllocationError::DuplicateCategory(share.name.clone()));
            }
        }

        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        if (sum - 100.0).abs() > PERCENTAGE_SUM_TOLERANCE {
            return Err(AllocationError::PercentageSum { sum });
        }

        Ok(Self { shares, total })
    }

    pub fn shares(&self) -> &[CategoryShare] {
        &self.shares
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn allocate(&self) -> Vec<CategoryCount> {
        allocate_capture_counts(&self.shares, self.total)
    }
}
