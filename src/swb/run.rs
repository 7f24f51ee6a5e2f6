//! Day-stepping simulation orchestration.
//!
//! - `finish_date()`: terminal date of the simulable window
//! - `run()`: execute the balance day by day over that window

use chrono::{Duration, NaiveDate};
use tracing::debug;

use super::params::SoilParameters;
use super::processes;
use super::state::State;
use super::trace::{DailyTrace, DayRecord};
use crate::crop::CropStageModel;
use crate::error::{Error, Result};
use crate::irrigation::{self, AppliedIrrigation};
use crate::timeseries::TimeSeries;

/// Inputs to a single balance run. All series are read-only; the engine
/// advances its own day cursor and queries each series independently.
#[derive(Debug, Clone, Copy)]
pub struct Inputs<'a> {
    pub precipitation: &'a TimeSeries,
    pub evapotranspiration: &'a TimeSeries,
    pub irrigations: &'a [AppliedIrrigation],
    /// Field area [m2], used to convert recorded volumes to depths.
    pub field_area_m2: f64,
    pub start_date: NaiveDate,
    /// Optional hard stop; the environmental record may end earlier.
    pub end_date: Option<NaiveDate>,
    /// Initial saturation relative to field capacity; defaults to a full
    /// profile (1.0).
    pub initial_moisture_fraction: Option<f64>,
}

/// Result of a balance run.
#[derive(Debug, Clone, PartialEq)]
pub struct SwbRun {
    pub trace: DailyTrace,
    /// Gross recommendation for the terminal day [mm]; zero when the
    /// terminal day is not flagged.
    pub next_irrigation: f64,
    pub finish_date: NaiveDate,
}

/// Terminal date of the simulation: the environmental record's shorter
/// bound, further capped by the caller's end date when given.
///
/// Computed once before the run starts; the engine cannot simulate past
/// the available record.
pub fn finish_date(
    precipitation: &TimeSeries,
    evapotranspiration: &TimeSeries,
    end_date: Option<NaiveDate>,
) -> Result<NaiveDate> {
    let (_, precip_last) = precipitation.bounding_dates("precipitation")?;
    let (_, evap_last) = evapotranspiration.bounding_dates("evapotranspiration")?;
    let mut finish = precip_last.date().min(evap_last.date());
    if let Some(end) = end_date {
        finish = finish.min(end);
    }
    Ok(finish)
}

/// Run the soil water balance from the start date to the terminal date.
///
/// Fails on any missing precipitation or evapotranspiration value inside
/// the window — partial balances are misleading for an irrigation
/// decision, so no partial trace is ever produced.
pub fn run(params: &SoilParameters, crop: &CropStageModel, inputs: &Inputs) -> Result<SwbRun> {
    if !(inputs.field_area_m2 > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "field area {} must be positive",
            inputs.field_area_m2
        )));
    }
    if let Some(e) = inputs
        .irrigations
        .iter()
        .find(|e| matches!(e.supplied_water_volume, Some(v) if v < 0.0))
    {
        return Err(Error::InvalidParameter(format!(
            "recorded irrigation on {} has negative volume",
            e.day()
        )));
    }
    let initial_fraction = inputs.initial_moisture_fraction.unwrap_or(1.0);
    if !(initial_fraction > 0.0 && initial_fraction <= 1.0) {
        return Err(Error::InvalidParameter(format!(
            "initial moisture fraction {initial_fraction} must be in (0, 1]"
        )));
    }

    let finish = finish_date(
        inputs.precipitation,
        inputs.evapotranspiration,
        inputs.end_date,
    )?;
    if finish < inputs.start_date {
        return Err(Error::InvalidParameter(format!(
            "finish date {finish} precedes start date {}",
            inputs.start_date
        )));
    }

    let n_days = (finish - inputs.start_date).num_days() as usize + 1;
    debug!(start = %inputs.start_date, %finish, n_days, "starting balance run");

    let start_depth = crop.root_depth(inputs.start_date) * params.root_depth_factor;
    let mut state = State::initialize(
        inputs.start_date,
        params.field_capacity,
        start_depth,
        initial_fraction,
    );

    let mut trace = DailyTrace::with_capacity(n_days);
    for offset in 0..n_days {
        let date = inputs.start_date + Duration::days(offset as i64);
        state = step(params, crop, inputs, &state, date, &mut trace)?;
    }

    let last = trace.len() - 1;
    let next_irrigation = if trace.irrigation_flagged[last] {
        trace.recommended_irrigation[last]
    } else {
        0.0
    };
    debug!(next_irrigation, "balance run finished");

    Ok(SwbRun {
        trace,
        next_irrigation,
        finish_date: finish,
    })
}

/// Execute one daily transition, appending the day's record to `trace`
/// and returning the end-of-day state.
fn step(
    params: &SoilParameters,
    crop: &CropStageModel,
    inputs: &Inputs,
    state: &State,
    date: NaiveDate,
    trace: &mut DailyTrace,
) -> Result<State> {
    // 1. Root growth rescales the stored volume, preserving saturation.
    let depth = crop.root_depth(date) * params.root_depth_factor;
    let capacity = processes::capacity_mm(params.field_capacity, depth);
    let mut moisture = processes::rescale_for_root_growth(state.moisture, state.capacity, capacity);

    // Exact-date lookups: a day with no record at all must not inherit
    // the previous day's value, a gap could hide real irrigation need.
    let et0 = inputs
        .evapotranspiration
        .value_exact_on(date)
        .ok_or(Error::MissingData {
            variable: "evapotranspiration",
            date,
        })?;
    let precip = inputs
        .precipitation
        .value_exact_on(date)
        .ok_or(Error::MissingData {
            variable: "precipitation",
            date,
        })?;

    // 2. Crop water use.
    let crop_et = processes::crop_water_use(et0, crop.kc(date));
    moisture -= crop_et;

    // 3. Effective rainfall; excess above capacity drains.
    let effective_rain = processes::effective_rainfall(precip, params.effective_rainfall_factor);
    moisture = (moisture + effective_rain).min(capacity);

    // Total crop stress floors at zero, never negative storage.
    moisture = moisture.max(0.0);
    let deficit = capacity - moisture;

    // 4./5. Recorded reality wins over prediction. Any recorded event,
    // even one with zero volume, supersedes the model recommendation.
    let recorded = irrigation::depth_on(
        inputs.irrigations,
        date,
        params,
        crop,
        inputs.field_area_m2,
    );
    let applied = recorded.unwrap_or(0.0);
    let mut recommended = 0.0;
    let mut flagged = false;
    if let Some(gross) = recorded {
        let net = processes::net_applied(gross, params.irrigation_efficiency);
        moisture = (moisture + net).min(capacity);
    } else {
        let threshold = processes::depletion_threshold_mm(
            params.field_capacity,
            params.wilting_point,
            params.depletion_fraction,
            depth,
        );
        if moisture <= threshold {
            flagged = true;
            recommended = processes::gross_irrigation(deficit, params.irrigation_efficiency);
            // The model assumes its own advice is followed, so the
            // balance continues from a refilled profile.
            moisture = capacity;
        }
    }

    trace.push(&DayRecord {
        date,
        moisture,
        moisture_fraction: moisture / capacity,
        deficit,
        crop_et,
        effective_rain,
        applied_irrigation: applied,
        recommended_irrigation: recommended,
        irrigation_flagged: flagged,
    });

    Ok(State {
        date,
        moisture,
        capacity,
    })
}
