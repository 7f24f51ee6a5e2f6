//! System defaults and numeric constants for the balance engine.
//!
//! Default parameter values match the advisory system's documented
//! defaults; a caller that has no field-specific soil analysis or crop
//! configuration falls back to these.

// -- Unit conversions --

/// Millimetres of water depth per metre.
pub const MM_PER_M: f64 = 1000.0;

// -- Soil defaults --

/// Field capacity [volumetric fraction].
pub const DEFAULT_FIELD_CAPACITY: f64 = 0.40;

/// Permanent wilting point [volumetric fraction].
pub const DEFAULT_WILTING_POINT: f64 = 0.10;

/// Soil moisture at saturation, theta_s [volumetric fraction].
pub const DEFAULT_THETA_S: f64 = 0.50;

// -- Irrigation defaults --

/// Irrigation efficiency [-].
pub const DEFAULT_IRRIGATION_EFFICIENCY: f64 = 0.6;

/// Management allowed depletion: fraction of plant-available water that
/// may be depleted before irrigation is triggered.
pub const DEFAULT_DEPLETION_FRACTION: f64 = 0.50;

/// Fraction of precipitation retained in the root zone.
pub const DEFAULT_EFFECTIVE_RAINFALL_FACTOR: f64 = 1.0;

// -- Crop defaults --

/// Root-zone depth range [m].
pub const DEFAULT_ROOT_DEPTH_MIN: f64 = 0.7;
pub const DEFAULT_ROOT_DEPTH_MAX: f64 = 1.2;

/// Crop coefficient at planting and off-season.
pub const DEFAULT_KC: f64 = 0.7;

/// Root-depth growth multiplier [-].
pub const DEFAULT_ROOT_DEPTH_FACTOR: f64 = 1.0;

// -- Reporting --

/// A recorded irrigation older than this many days triggers a staleness
/// warning in the advisory report.
pub const STALENESS_WARNING_DAYS: i64 = 5;
