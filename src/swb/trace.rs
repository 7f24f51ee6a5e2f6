//! Daily simulation trace.
//!
//! Two levels: `DayRecord` holds a single simulated day, `DailyTrace`
//! holds the full run (one Vec per field). The trace backs the advisory
//! report and the caller's charting/CSV export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One simulated day, as produced by the engine's daily transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    /// Stored water at end of day [mm].
    pub moisture: f64,
    /// Saturation relative to field-capacity storage at end of day.
    pub moisture_fraction: f64,
    /// Deficit below field-capacity storage at the irrigation decision
    /// point, before any water is applied [mm].
    pub deficit: f64,
    /// Crop water use: ET0 x Kc [mm].
    pub crop_et: f64,
    /// Precipitation retained in the root zone [mm].
    pub effective_rain: f64,
    /// Gross recorded irrigation applied this day [mm].
    pub applied_irrigation: f64,
    /// Gross model-recommended irrigation for this day [mm].
    pub recommended_irrigation: f64,
    /// Whether the depletion trigger flagged this day.
    pub irrigation_flagged: bool,
}

/// Full daily trace of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTrace {
    pub dates: Vec<NaiveDate>,
    pub moisture: Vec<f64>,
    pub moisture_fraction: Vec<f64>,
    pub deficit: Vec<f64>,
    pub crop_et: Vec<f64>,
    pub effective_rain: Vec<f64>,
    pub applied_irrigation: Vec<f64>,
    pub recommended_irrigation: Vec<f64>,
    pub irrigation_flagged: Vec<bool>,
}

impl DailyTrace {
    /// Pre-allocate all vectors for `n` days.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            dates: Vec::with_capacity(n),
            moisture: Vec::with_capacity(n),
            moisture_fraction: Vec::with_capacity(n),
            deficit: Vec::with_capacity(n),
            crop_et: Vec::with_capacity(n),
            effective_rain: Vec::with_capacity(n),
            applied_irrigation: Vec::with_capacity(n),
            recommended_irrigation: Vec::with_capacity(n),
            irrigation_flagged: Vec::with_capacity(n),
        }
    }

    /// Push a single day's record into the trace.
    pub fn push(&mut self, r: &DayRecord) {
        self.dates.push(r.date);
        self.moisture.push(r.moisture);
        self.moisture_fraction.push(r.moisture_fraction);
        self.deficit.push(r.deficit);
        self.crop_et.push(r.crop_et);
        self.effective_rain.push(r.effective_rain);
        self.applied_irrigation.push(r.applied_irrigation);
        self.recommended_irrigation.push(r.recommended_irrigation);
        self.irrigation_flagged.push(r.irrigation_flagged);
    }

    /// Number of simulated days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
