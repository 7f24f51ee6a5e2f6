//! Recorded real-world irrigation events.
//!
//! Authoritative inputs to the balance: on a day with a recorded
//! irrigation, the engine applies the recorded (or estimated) amount
//! instead of a model-computed recommendation. Recorded reality always
//! wins over prediction.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::crop::CropStageModel;
use crate::swb::constants::MM_PER_M;
use crate::swb::params::SoilParameters;

/// A real irrigation event recorded by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedIrrigation {
    pub timestamp: NaiveDateTime,
    /// Supplied water volume [m3]. `None` when the user did not record
    /// the amount; it is then estimated from system defaults.
    pub supplied_water_volume: Option<f64>,
}

/// A reported water volume plus whether it had to be estimated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterVolume {
    /// Volume [m3].
    pub volume: f64,
    /// True when the volume was derived from system defaults rather than
    /// recorded by the user.
    pub estimated: bool,
}

impl AppliedIrrigation {
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Water volume of this event [m3].
    ///
    /// When unrecorded, estimated as one full management-allowed
    /// depletion refill over the field: depletion fraction x (FC - WP) x
    /// root depth x area.
    pub fn water_volume(
        &self,
        params: &SoilParameters,
        crop: &CropStageModel,
        area_m2: f64,
    ) -> WaterVolume {
        match self.supplied_water_volume {
            Some(volume) => WaterVolume {
                volume,
                estimated: false,
            },
            None => {
                let depth_m = params.depletion_fraction
                    * params.available_water_fraction()
                    * crop.root_depth(self.day())
                    * params.root_depth_factor;
                WaterVolume {
                    volume: depth_m * area_m2,
                    estimated: true,
                }
            }
        }
    }

    /// Gross applied depth over the field [mm].
    pub fn depth_mm(&self, params: &SoilParameters, crop: &CropStageModel, area_m2: f64) -> f64 {
        self.water_volume(params, crop, area_m2).volume / area_m2 * MM_PER_M
    }
}

/// Most recent recorded event, by timestamp.
pub fn latest(events: &[AppliedIrrigation]) -> Option<&AppliedIrrigation> {
    events.iter().max_by_key(|e| e.timestamp)
}

/// Sum of gross applied depth on `date` [mm], across all events that day.
///
/// `None` when no event was recorded on that day. A recorded event with
/// zero volume yields `Some(0.0)`, which is not the same thing: the user
/// did irrigate, and the record supersedes any model recommendation.
pub fn depth_on(
    events: &[AppliedIrrigation],
    date: NaiveDate,
    params: &SoilParameters,
    crop: &CropStageModel,
    area_m2: f64,
) -> Option<f64> {
    let mut total = None;
    for e in events.iter().filter(|e| e.day() == date) {
        *total.get_or_insert(0.0) += e.depth_mm(params, crop, area_m2);
    }
    total
}
