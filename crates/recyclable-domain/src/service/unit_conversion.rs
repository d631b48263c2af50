//! Liquid-volume unit conversion and size bucketing
//!
//! Volumes are normalized to US fluid ounces. `NA` and `unknown` units map to
//! the [`UNKNOWN_OUNCES`] sentinel rather than failing. An unrecognized unit
//! string is rejected when it is parsed into a [`LiquidVolumeUnit`].

use crate::model::{ContainerSize, LiquidVolumeUnit};

pub const OUNCES_PER_LITER: f64 = 33.814;
pub const MILLILITERS_PER_LITER: f64 = 1000.0;
pub const OUNCES_PER_MILLILITER: f64 = OUNCES_PER_LITER / MILLILITERS_PER_LITER;

/// Sentinel for "unknown / not applicable"
pub const UNKNOWN_OUNCES: f64 = -1.0;

/// Threshold between the small and large size buckets
pub const SIZE_THRESHOLD_OUNCES: f64 = 24.0;

/// Convert a volume in `unit` to fluid ounces
pub fn to_fluid_ounces(volume: f64, unit: LiquidVolumeUnit) -> f64 {
    match unit {
        LiquidVolumeUnit::Oz => volume,
        LiquidVolumeUnit::Ml => volume * OUNCES_PER_MILLILITER,
        LiquidVolumeUnit::Liter => volume * OUNCES_PER_LITER,
        LiquidVolumeUnit::Na | LiquidVolumeUnit::Unknown => UNKNOWN_OUNCES,
    }
}

/// Convert fluid ounces back into `unit`
pub fn from_fluid_ounces(ounces: f64, unit: LiquidVolumeUnit) -> f64 {
    match unit {
        LiquidVolumeUnit::Oz => ounces,
        LiquidVolumeUnit::Ml => ounces / OUNCES_PER_MILLILITER,
        LiquidVolumeUnit::Liter => ounces / OUNCES_PER_LITER,
        LiquidVolumeUnit::Na | LiquidVolumeUnit::Unknown => UNKNOWN_OUNCES,
    }
}

/// Bucket a volume: negative ounces are unknown, 24 oz belongs to the large bucket
pub fn classify_size(volume: f64, unit: LiquidVolumeUnit) -> ContainerSize {
    let ounces = to_fluid_ounces(volume, unit);
    if ounces < 0.0 {
        ContainerSize::Unknown
    } else if ounces < SIZE_THRESHOLD_OUNCES {
        ContainerSize::Lt24Oz
    } else {
        ContainerSize::Gte24Oz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================
    // Conversion
    // ==========================================

    #[test]
    fn test_oz_is_identity() {
        assert!((to_fluid_ounces(12.0, LiquidVolumeUnit::Oz) - 12.0).abs() < f64::EPSILON);
        let back = from_fluid_ounces(to_fluid_ounces(16.9, LiquidVolumeUnit::Oz), LiquidVolumeUnit::Oz);
        assert!((back - 16.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_milliliters() {
        let oz = to_fluid_ounces(1000.0, LiquidVolumeUnit::Ml);
        assert!((oz - 33.814).abs() < 1e-9);
        // 355 mL can ~ 12 oz
        let can = to_fluid_ounces(355.0, LiquidVolumeUnit::Ml);
        assert!((can - 12.004).abs() < 0.001);
    }

    #[test]
    fn test_liters() {
        let oz = to_fluid_ounces(1.25, LiquidVolumeUnit::Liter);
        assert!((oz - 42.2675).abs() < 0.0001);
    }

    #[test]
    fn test_ml_round_trip() {
        let back = from_fluid_ounces(to_fluid_ounces(500.0, LiquidVolumeUnit::Ml), LiquidVolumeUnit::Ml);
        assert!((back - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_na_and_unknown_are_sentinel() {
        assert_eq!(to_fluid_ounces(12.0, LiquidVolumeUnit::Na), UNKNOWN_OUNCES);
        assert_eq!(to_fluid_ounces(12.0, LiquidVolumeUnit::Unknown), UNKNOWN_OUNCES);
    }

    // ==========================================
    // Size buckets
    // ==========================================

    #[test]
    fn test_size_boundary() {
        assert_eq!(classify_size(24.0, LiquidVolumeUnit::Oz), ContainerSize::Gte24Oz);
        assert_eq!(classify_size(23.999, LiquidVolumeUnit::Oz), ContainerSize::Lt24Oz);
        assert_eq!(classify_size(0.0, LiquidVolumeUnit::Oz), ContainerSize::Lt24Oz);
    }

    #[test]
    fn test_size_unknown_for_na() {
        for volume in [-1.0, 0.0, 12.0, 1000.0] {
            assert_eq!(classify_size(volume, LiquidVolumeUnit::Na), ContainerSize::Unknown);
        }
    }

    #[test]
    fn test_size_negative_volume_is_unknown() {
        assert_eq!(classify_size(-1.0, LiquidVolumeUnit::Oz), ContainerSize::Unknown);
    }

    #[test]
    fn test_size_metric() {
        assert_eq!(classify_size(710.0, LiquidVolumeUnit::Ml), ContainerSize::Gte24Oz);
        assert_eq!(classify_size(500.0, LiquidVolumeUnit::Ml), ContainerSize::Lt24Oz);
        assert_eq!(classify_size(2.0, LiquidVolumeUnit::Liter), ContainerSize::Gte24Oz);
    }
}
