//! Timestamped environmental observation series.
//!
//! An ordered, append-only sequence of `(timestamp, value)` records where a
//! value may be missing (no measurement); missing is never coerced to zero.
//! Series from different sources (daily rain rasters, staged coefficients)
//! need not be pre-aligned: the balance engine advances a single day cursor
//! and queries each series independently.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Canonical end-of-day instant for date-stamped observations.
///
/// Daily rasters carry a date only; callers needing a same-day default
/// query at 23:59, matching the original system's `default_time`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap())
}

/// A single observation. `value == None` means no measurement exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

/// Ordered sequence of observations with strictly increasing timestamps.
///
/// Built once from a raster/point extraction or from recorded events,
/// then consumed read-only for bounding-date and per-day lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    records: Vec<Observation>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation. Timestamps must be strictly increasing.
    pub fn push(&mut self, timestamp: NaiveDateTime, value: Option<f64>) -> Result<()> {
        if let Some(last) = self.records.last() {
            if timestamp <= last.timestamp {
                return Err(Error::InvalidParameter(format!(
                    "timestamp {timestamp} is not after previous {}",
                    last.timestamp
                )));
            }
        }
        self.records.push(Observation { timestamp, value });
        Ok(())
    }

    /// Build a series of consecutive daily values starting at `start`,
    /// each stamped at the canonical end-of-day instant.
    pub fn from_daily<I>(start: NaiveDate, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let records = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Observation {
                timestamp: end_of_day(start + chrono::Duration::days(i as i64)),
                value,
            })
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    /// First and last timestamps carrying a non-missing value.
    ///
    /// Fails with `EmptySeries` when no non-missing values exist.
    pub fn bounding_dates(&self, name: &str) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let mut present = self.records.iter().filter(|r| r.value.is_some());
        let first = present.next().ok_or_else(|| Error::EmptySeries {
            name: name.to_string(),
        })?;
        let last = present.last().unwrap_or(first);
        Ok((first.timestamp, last.timestamp))
    }

    /// Value of the nearest record at or before `timestamp`.
    ///
    /// Returns `None` when no such record exists or when the record is a
    /// missing measurement.
    pub fn value_at(&self, timestamp: NaiveDateTime) -> Option<f64> {
        let idx = self
            .records
            .partition_point(|r| r.timestamp <= timestamp)
            .checked_sub(1)?;
        self.records[idx].value
    }

    /// Day-keyed lookup: the value at the canonical end-of-day of `date`.
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.value_at(end_of_day(date))
    }

    /// Day-keyed lookup requiring a record stamped exactly at the
    /// canonical end-of-day of `date`.
    ///
    /// Unlike `value_on`, a date with no record at all yields `None`
    /// instead of inheriting the nearest prior value, so a timestamp gap
    /// is indistinguishable from an explicit missing measurement.
    pub fn value_exact_on(&self, date: NaiveDate) -> Option<f64> {
        let timestamp = end_of_day(date);
        let idx = self.records.partition_point(|r| r.timestamp < timestamp);
        match self.records.get(idx) {
            Some(r) if r.timestamp == timestamp => r.value,
            _ => None,
        }
    }

    /// Sub-series between `start` and `end`, inclusive on both bounds.
    pub fn clip(&self, start: NaiveDateTime, end: NaiveDateTime) -> TimeSeries {
        let records = self
            .records
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp <= end)
            .copied()
            .collect();
        TimeSeries { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series() -> TimeSeries {
        TimeSeries::from_daily(
            date(2019, 3, 1),
            vec![Some(1.0), None, Some(3.0), Some(4.0)],
        )
    }

    // -- bounding_dates --

    #[test]
    fn bounding_dates_skip_missing_edges() {
        let s = TimeSeries::from_daily(
            date(2019, 3, 1),
            vec![None, Some(2.0), Some(3.0), None],
        );
        let (first, last) = s.bounding_dates("rain").unwrap();
        assert_eq!(first, end_of_day(date(2019, 3, 2)));
        assert_eq!(last, end_of_day(date(2019, 3, 3)));
    }

    #[test]
    fn bounding_dates_single_value() {
        let s = TimeSeries::from_daily(date(2019, 3, 1), vec![None, Some(2.0), None]);
        let (first, last) = s.bounding_dates("rain").unwrap();
        assert_eq!(first, last);
    }

    #[test]
    fn bounding_dates_empty_series_fails() {
        let s = TimeSeries::new();
        let err = s.bounding_dates("evaporation").unwrap_err();
        assert!(matches!(err, Error::EmptySeries { .. }));
    }

    #[test]
    fn bounding_dates_all_missing_fails() {
        let s = TimeSeries::from_daily(date(2019, 3, 1), vec![None, None]);
        assert!(matches!(
            s.bounding_dates("rain"),
            Err(Error::EmptySeries { .. })
        ));
    }

    // -- push ordering --

    #[test]
    fn push_rejects_non_increasing_timestamps() {
        let mut s = TimeSeries::new();
        s.push(end_of_day(date(2019, 3, 2)), Some(1.0)).unwrap();
        let err = s.push(end_of_day(date(2019, 3, 2)), Some(2.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        let err = s.push(end_of_day(date(2019, 3, 1)), Some(2.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    // -- value_at / value_on --

    #[test]
    fn value_at_exact_match() {
        let s = series();
        assert_eq!(s.value_at(end_of_day(date(2019, 3, 1))), Some(1.0));
    }

    #[test]
    fn value_at_takes_nearest_prior() {
        let s = series();
        let noon = date(2019, 3, 4).and_hms_opt(12, 0, 0).unwrap();
        // 23:59 of day 3 is the nearest prior record.
        assert_eq!(s.value_at(noon), Some(3.0));
    }

    #[test]
    fn value_at_before_first_record() {
        let s = series();
        assert_eq!(s.value_at(end_of_day(date(2019, 2, 28))), None);
    }

    #[test]
    fn value_at_missing_record_is_none() {
        let s = series();
        assert_eq!(s.value_on(date(2019, 3, 2)), None);
    }

    #[test]
    fn value_on_daily_lookup() {
        let s = series();
        assert_eq!(s.value_on(date(2019, 3, 3)), Some(3.0));
        assert_eq!(s.value_on(date(2019, 3, 4)), Some(4.0));
    }

    #[test]
    fn value_exact_on_requires_the_day_record() {
        let mut s = TimeSeries::new();
        s.push(end_of_day(date(2019, 3, 1)), Some(1.0)).unwrap();
        s.push(end_of_day(date(2019, 3, 3)), Some(3.0)).unwrap();
        assert_eq!(s.value_exact_on(date(2019, 3, 1)), Some(1.0));
        // The gap day does not inherit the prior record.
        assert_eq!(s.value_exact_on(date(2019, 3, 2)), None);
        assert_eq!(s.value_on(date(2019, 3, 2)), Some(1.0));
        assert_eq!(s.value_exact_on(date(2019, 3, 3)), Some(3.0));
    }

    #[test]
    fn value_exact_on_missing_measurement_is_none() {
        let s = series();
        assert_eq!(s.value_exact_on(date(2019, 3, 2)), None);
        assert_eq!(s.value_exact_on(date(2019, 2, 28)), None);
    }

    // -- clip --

    #[test]
    fn clip_is_inclusive_on_both_bounds() {
        let s = series();
        let clipped = s.clip(
            end_of_day(date(2019, 3, 2)),
            end_of_day(date(2019, 3, 3)),
        );
        assert_eq!(clipped.len(), 2);
        assert_eq!(clipped.records()[0].value, None);
        assert_eq!(clipped.records()[1].value, Some(3.0));
    }

    #[test]
    fn clip_outside_range_is_empty() {
        let s = series();
        let clipped = s.clip(
            end_of_day(date(2019, 4, 1)),
            end_of_day(date(2019, 4, 5)),
        );
        assert!(clipped.is_empty());
    }

    // -- from_daily --

    #[test]
    fn from_daily_stamps_consecutive_end_of_day() {
        let s = TimeSeries::from_daily(date(2019, 3, 1), vec![Some(1.0), Some(2.0)]);
        assert_eq!(s.records()[0].timestamp, end_of_day(date(2019, 3, 1)));
        assert_eq!(s.records()[1].timestamp, end_of_day(date(2019, 3, 2)));
    }
}
