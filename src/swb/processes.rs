//! Pure per-day water-balance process functions.
//!
//! All inputs and outputs are f64; moisture and water amounts are in mm
//! of stored water over the root zone, depths in m, fractions
//! dimensionless.

use super::constants::MM_PER_M;

/// Storage capacity of the root zone at field capacity [mm].
pub fn capacity_mm(field_capacity: f64, root_depth_m: f64) -> f64 {
    field_capacity * root_depth_m * MM_PER_M
}

/// Rescale stored moisture when the root zone deepens.
///
/// The prior *fractional* saturation is preserved and applied to the new
/// capacity. Copying the stored volume unchanged would manufacture a drop
/// in saturation; copying the fraction without rescaling the volume would
/// manufacture water out of root growth.
pub fn rescale_for_root_growth(moisture: f64, old_capacity: f64, new_capacity: f64) -> f64 {
    if old_capacity <= 0.0 || old_capacity == new_capacity {
        return moisture;
    }
    moisture / old_capacity * new_capacity
}

/// Crop water use for the day [mm]: reference ET scaled by Kc.
pub fn crop_water_use(et0: f64, kc: f64) -> f64 {
    et0 * kc
}

/// Precipitation retained in the root zone [mm].
pub fn effective_rainfall(precip: f64, factor: f64) -> f64 {
    precip * factor
}

/// Moisture level at which irrigation is triggered [mm].
///
/// The management-allowed-depletion trigger: the configured fraction of
/// plant-available water (FC - WP) below field capacity.
pub fn depletion_threshold_mm(
    field_capacity: f64,
    wilting_point: f64,
    depletion_fraction: f64,
    root_depth_m: f64,
) -> f64 {
    (field_capacity - depletion_fraction * (field_capacity - wilting_point))
        * root_depth_m
        * MM_PER_M
}

/// Gross water to apply for a net deficit [mm].
///
/// Inefficiency means more gross water must be applied than the net
/// deficit.
pub fn gross_irrigation(net_deficit: f64, efficiency: f64) -> f64 {
    net_deficit / efficiency
}

/// Net water reaching the root zone from a gross application [mm].
pub fn net_applied(gross: f64, efficiency: f64) -> f64 {
    gross * efficiency
}
