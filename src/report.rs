//! Advisory report assembly.
//!
//! Turns a balance run into the figures a caller renders: the rounded
//! next-irrigation amount, a staleness warning against the most recent
//! recorded irrigation, and applied-vs-recommended performance series
//! over an arbitrary date range.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::crop::CropStageModel;
use crate::error::Result;
use crate::irrigation;
use crate::swb::constants::STALENESS_WARNING_DAYS;
use crate::swb::params::SoilParameters;
use crate::swb::run::{self, Inputs};
use crate::swb::trace::DailyTrace;

/// Final advisory figures for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    /// Recommended gross amount for the next irrigation [mm], rounded to
    /// 2 decimals for presentation; zero when no irrigation is due.
    pub next_irrigation: f64,
    /// True when the most recent recorded irrigation is 5 or more days
    /// old at assembly time.
    pub warning: bool,
    /// Elapsed whole days since the most recent recorded irrigation,
    /// present only when the warning is set.
    pub warning_days: Option<i64>,
    /// Full daily trace for reporting and performance views.
    pub trace: DailyTrace,
    /// Last simulable date of the environmental record.
    pub finish_date: NaiveDate,
}

/// Run the balance and assemble the advisory.
///
/// Callers conventionally set the run's start date to the day of the
/// latest recorded irrigation; `now` is only compared against recorded
/// irrigations for staleness.
pub fn advise(
    params: &SoilParameters,
    crop: &CropStageModel,
    inputs: &Inputs,
    now: NaiveDateTime,
) -> Result<AdvisoryResult> {
    let run = run::run(params, crop, inputs)?;

    let (warning, warning_days) = match irrigation::latest(inputs.irrigations) {
        Some(last) if now - last.timestamp >= Duration::days(STALENESS_WARNING_DAYS) => {
            let days = (now - last.timestamp).num_days();
            warn!(days, "latest recorded irrigation is stale");
            (true, Some(days))
        }
        _ => (false, None),
    };

    Ok(AdvisoryResult {
        next_irrigation: round2(run.next_irrigation),
        warning,
        warning_days,
        trace: run.trace,
        finish_date: run.finish_date,
    })
}

/// Applied-vs-recommended irrigation figures over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationPerformance {
    pub dates: Vec<NaiveDate>,
    /// Gross water applied per day [mm]: the recorded amount when one
    /// exists, else the model-determined amount.
    pub applied: Vec<f64>,
    /// Gross model-recommended amount per day [mm].
    pub recommended: Vec<f64>,
    pub total_applied: f64,
    pub total_recommended: f64,
    pub total_crop_et: f64,
}

impl IrrigationPerformance {
    /// Extract performance series from a trace, inclusive on both bounds.
    pub fn over(trace: &DailyTrace, start: NaiveDate, end: NaiveDate) -> Self {
        let mut dates = Vec::new();
        let mut applied = Vec::new();
        let mut recommended = Vec::new();
        let mut total_crop_et = 0.0;
        for (i, date) in trace.dates.iter().enumerate() {
            if *date < start || *date > end {
                continue;
            }
            let recorded = trace.applied_irrigation[i];
            dates.push(*date);
            applied.push(if recorded > 0.0 {
                recorded
            } else {
                trace.recommended_irrigation[i]
            });
            recommended.push(trace.recommended_irrigation[i]);
            total_crop_et += trace.crop_et[i];
        }
        let total_applied = applied.iter().sum();
        let total_recommended = recommended.iter().sum();
        Self {
            dates,
            applied,
            recommended,
            total_applied,
            total_recommended,
            total_crop_et,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
