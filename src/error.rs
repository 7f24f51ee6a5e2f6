//! Error taxonomy for the advisory core.
//!
//! Every failure aborts the current advisory computation; none are retried,
//! since the inputs are deterministic and a retry without new data would
//! reproduce the same failure. The caller translates these into its own
//! "no forecast available" presentation.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by sampling, series handling, and the balance run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The requested point lies outside the extent of every raster.
    #[error("point ({lat}, {lon}) is outside every raster extent")]
    Lookup { lat: f64, lon: f64 },

    /// A required time series has no usable observations at all.
    #[error("time series '{name}' has no non-missing observations")]
    EmptySeries { name: String },

    /// A date inside the simulated window lacks a required value.
    /// Fatal to the run: a gap could hide real irrigation need.
    #[error("missing {variable} value for {date}")]
    MissingData {
        variable: &'static str,
        date: NaiveDate,
    },

    /// Soil/crop parameters violate their stated invariants.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
