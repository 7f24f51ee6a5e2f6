//! Per-field soil and irrigation parameters.
//!
//! Owned by the caller and passed by value into the engine per run.
//! Validation happens once at construction; the engine can then assume
//! every invariant holds.

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_DEPLETION_FRACTION, DEFAULT_EFFECTIVE_RAINFALL_FACTOR, DEFAULT_FIELD_CAPACITY,
    DEFAULT_IRRIGATION_EFFICIENCY, DEFAULT_ROOT_DEPTH_FACTOR, DEFAULT_THETA_S,
    DEFAULT_WILTING_POINT,
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilParameters {
    /// Field capacity [volumetric fraction, 0-1].
    pub field_capacity: f64,
    /// Permanent wilting point [volumetric fraction, < field capacity].
    pub wilting_point: f64,
    /// Moisture at saturation [volumetric fraction, > field capacity].
    pub theta_s: f64,
    /// Irrigation efficiency (0, 1].
    pub irrigation_efficiency: f64,
    /// Management allowed depletion fraction (0, 1].
    pub depletion_fraction: f64,
    /// Fraction of precipitation retained in the root zone (0, 1].
    pub effective_rainfall_factor: f64,
    /// Root-depth growth multiplier.
    pub root_depth_factor: f64,
}

impl SoilParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        field_capacity: f64,
        wilting_point: f64,
        theta_s: f64,
        irrigation_efficiency: f64,
        depletion_fraction: f64,
        effective_rainfall_factor: f64,
        root_depth_factor: f64,
    ) -> Result<Self> {
        let p = Self {
            field_capacity,
            wilting_point,
            theta_s,
            irrigation_efficiency,
            depletion_fraction,
            effective_rainfall_factor,
            root_depth_factor,
        };
        p.validate()?;
        Ok(p)
    }

    fn validate(&self) -> Result<()> {
        if !(self.field_capacity > 0.0 && self.field_capacity < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "field capacity {} must be in (0, 1)",
                self.field_capacity
            )));
        }
        if !(self.wilting_point > 0.0) || self.wilting_point >= self.field_capacity {
            return Err(Error::InvalidParameter(format!(
                "wilting point {} must be in (0, field capacity {})",
                self.wilting_point, self.field_capacity
            )));
        }
        if self.theta_s <= self.field_capacity || self.theta_s > 1.0 {
            return Err(Error::InvalidParameter(format!(
                "theta_s {} must be in (field capacity {}, 1]",
                self.theta_s, self.field_capacity
            )));
        }
        if !(self.irrigation_efficiency > 0.0 && self.irrigation_efficiency <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "irrigation efficiency {} must be in (0, 1]",
                self.irrigation_efficiency
            )));
        }
        if !(self.depletion_fraction > 0.0 && self.depletion_fraction <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "depletion fraction {} must be in (0, 1]",
                self.depletion_fraction
            )));
        }
        if !(self.effective_rainfall_factor > 0.0 && self.effective_rainfall_factor <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "effective rainfall factor {} must be in (0, 1]",
                self.effective_rainfall_factor
            )));
        }
        if !(self.root_depth_factor > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "root depth factor {} must be positive",
                self.root_depth_factor
            )));
        }
        Ok(())
    }

    /// Plant-available water fraction: FC - WP.
    pub fn available_water_fraction(&self) -> f64 {
        self.field_capacity - self.wilting_point
    }
}

impl Default for SoilParameters {
    fn default() -> Self {
        Self {
            field_capacity: DEFAULT_FIELD_CAPACITY,
            wilting_point: DEFAULT_WILTING_POINT,
            theta_s: DEFAULT_THETA_S,
            irrigation_efficiency: DEFAULT_IRRIGATION_EFFICIENCY,
            depletion_fraction: DEFAULT_DEPLETION_FRACTION,
            effective_rainfall_factor: DEFAULT_EFFECTIVE_RAINFALL_FACTOR,
            root_depth_factor: DEFAULT_ROOT_DEPTH_FACTOR,
        }
    }
}
