//! Point sampling: extract a scalar or a time series at a geographic point.
//!
//! Mirrors the two extraction shapes the advisory needs: a single
//! coefficient raster (field capacity, wilting point) yields a scalar; a
//! chronologically-named set of daily rasters (rain, evaporation) yields a
//! `TimeSeries` with one observation per distinct raster timestamp.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::raster::{GeoPoint, Raster};
use crate::timeseries::{end_of_day, TimeSeries};

/// A raster tagged with the date it was measured on.
#[derive(Debug, Clone)]
pub struct DatedRaster {
    pub date: NaiveDate,
    pub raster: Raster,
}

/// Scalar extraction from a single raster.
///
/// `Ok(None)` when the containing cell stores the nodata sentinel.
pub fn sample_point(point: GeoPoint, raster: &Raster) -> Result<Option<f64>> {
    raster.sample(point)
}

/// Time-series extraction from a set of dated rasters.
///
/// The set may be unordered and may contain several rasters for the same
/// date (overlapping tiles); one observation is taken per distinct date,
/// from the first raster covering the point. Dates whose rasters do not
/// cover the point become missing observations. Fails with `Lookup` only
/// when no raster in the whole set covers the point.
pub fn sample_point_series(point: GeoPoint, rasters: &[DatedRaster]) -> Result<TimeSeries> {
    // Outer Option: has any covering raster been seen for this date yet.
    let mut by_date: Vec<(NaiveDate, Option<Option<f64>>)> = Vec::new();
    let mut covered = false;

    for dr in rasters {
        let sample = if dr.raster.covers(point) {
            covered = true;
            Some(dr.raster.sample(point)?)
        } else {
            None
        };
        match by_date.iter_mut().find(|(d, _)| *d == dr.date) {
            // First covering raster for a date wins.
            Some((_, slot @ None)) => *slot = sample,
            Some(_) => {}
            None => by_date.push((dr.date, sample)),
        }
    }

    if !covered {
        return Err(Error::Lookup {
            lat: point.lat,
            lon: point.lon,
        });
    }

    by_date.sort_by_key(|(d, _)| *d);
    let mut series = TimeSeries::new();
    for (date, sample) in by_date {
        series.push(end_of_day(date), sample.flatten())?;
    }
    Ok(series)
}
