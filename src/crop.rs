//! Staged crop model: Kc and root depth as functions of calendar date.
//!
//! A crop's water need varies continuously through its growth cycle and
//! its root zone lengthens over the season; ignoring either badly biases
//! moisture estimates during early growth, when the actual root depth is
//! far below the mature maximum. Stages follow the usual agronomic form:
//! an ordered list of (duration, ending Kc) pairs with piecewise-linear
//! interpolation between stage boundaries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// One growth stage: `ndays` long, Kc reaching `kc_end` at its end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KcStage {
    pub ndays: u32,
    pub kc_end: f64,
}

/// Piecewise-staged Kc and root-depth model for a single crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropStageModel {
    planting_date: NaiveDate,
    /// Kc at the planting date; also the clamp value before planting and
    /// the constant fallback when no stages are configured.
    kc_planting: f64,
    stages: SmallVec<[KcStage; 4]>,
    root_depth_min: f64,
    root_depth_max: f64,
    /// Index of the stage at whose end the root zone reaches its maximum.
    growth_stage: usize,
}

impl CropStageModel {
    pub fn new(
        planting_date: NaiveDate,
        kc_planting: f64,
        stages: Vec<KcStage>,
        root_depth_min: f64,
        root_depth_max: f64,
        growth_stage: usize,
    ) -> Result<Self> {
        if !(kc_planting > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "kc at planting must be positive, got {kc_planting}"
            )));
        }
        if !(root_depth_min > 0.0) || root_depth_min > root_depth_max {
            return Err(Error::InvalidParameter(format!(
                "root depth range [{root_depth_min}, {root_depth_max}] is invalid"
            )));
        }
        if stages.iter().any(|s| s.ndays == 0) {
            return Err(Error::InvalidParameter(
                "crop stage with zero duration".to_string(),
            ));
        }
        if stages.iter().any(|s| !(s.kc_end > 0.0)) {
            return Err(Error::InvalidParameter(
                "crop stage with non-positive kc".to_string(),
            ));
        }
        if !stages.is_empty() && growth_stage >= stages.len() {
            return Err(Error::InvalidParameter(format!(
                "growth-completion stage {growth_stage} out of range for {} stages",
                stages.len()
            )));
        }
        Ok(Self {
            planting_date,
            kc_planting,
            stages: SmallVec::from_vec(stages),
            root_depth_min,
            root_depth_max,
            growth_stage,
        })
    }

    /// Constant-Kc model with no stages: the effective root depth is the
    /// midpoint of the configured range for the whole season.
    pub fn constant(
        planting_date: NaiveDate,
        kc: f64,
        root_depth_min: f64,
        root_depth_max: f64,
    ) -> Result<Self> {
        Self::new(planting_date, kc, Vec::new(), root_depth_min, root_depth_max, 0)
    }

    pub fn planting_date(&self) -> NaiveDate {
        self.planting_date
    }

    fn days_since_planting(&self, date: NaiveDate) -> i64 {
        (date - self.planting_date).num_days()
    }

    /// Crop coefficient on `date`.
    pub fn kc(&self, date: NaiveDate) -> f64 {
        if self.stages.is_empty() {
            return self.kc_planting;
        }
        let days = self.days_since_planting(date);
        if days <= 0 {
            return self.kc_planting;
        }
        let mut boundary_start = 0i64;
        let mut kc_start = self.kc_planting;
        for stage in &self.stages {
            let boundary_end = boundary_start + i64::from(stage.ndays);
            if days <= boundary_end {
                let t = (days - boundary_start) as f64 / f64::from(stage.ndays);
                return kc_start + t * (stage.kc_end - kc_start);
            }
            boundary_start = boundary_end;
            kc_start = stage.kc_end;
        }
        // Past the last boundary: clamp to the final stage value.
        kc_start
    }

    /// Root-zone depth [m] on `date`.
    ///
    /// Grows linearly from the minimum at planting to the maximum at the
    /// end of the growth-completion stage, clamped outside.
    pub fn root_depth(&self, date: NaiveDate) -> f64 {
        if self.stages.is_empty() {
            return 0.5 * (self.root_depth_min + self.root_depth_max);
        }
        let growth_days: i64 = self.stages[..=self.growth_stage]
            .iter()
            .map(|s| i64::from(s.ndays))
            .sum();
        let days = self.days_since_planting(date).clamp(0, growth_days);
        let t = days as f64 / growth_days as f64;
        self.root_depth_min + t * (self.root_depth_max - self.root_depth_min)
    }
}
