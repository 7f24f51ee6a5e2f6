//! soilwater — soil water balance irrigation-advisory core.
//!
//! Given point-sampled precipitation and evapotranspiration series plus
//! soil/crop parameters, simulates the running root-zone moisture balance
//! day by day and derives the next recommended irrigation amount. The
//! core is a pure, synchronous library: no file I/O, no persistence, no
//! shared mutable state — safe to invoke concurrently for different
//! fields as long as each invocation owns its inputs.
pub mod crop;
pub mod error;
pub mod irrigation;
pub mod raster;
pub mod report;
pub mod sampler;
pub mod swb;
pub mod timeseries;

pub use crop::{CropStageModel, KcStage};
pub use error::{Error, Result};
pub use irrigation::AppliedIrrigation;
pub use raster::{GeoPoint, Raster};
pub use report::{advise, AdvisoryResult, IrrigationPerformance};
pub use sampler::{sample_point, sample_point_series, DatedRaster};
pub use swb::params::SoilParameters;
pub use swb::run::{run, Inputs, SwbRun};
pub use swb::trace::DailyTrace;
pub use timeseries::TimeSeries;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Full pipeline: sample rain/evaporation rasters at a field's
    /// location, then run the advisory over the extracted series.
    #[test]
    fn sampled_series_drive_an_advisory() {
        let start = NaiveDate::from_ymd_opt(2019, 4, 1).unwrap();
        let point = GeoPoint::new(37.5, 21.5);

        let grid = |value: f64| Raster {
            origin_lon: 20.0,
            origin_lat: 38.0,
            pixel_width: 1.0,
            pixel_height: -1.0,
            width: 3,
            height: 2,
            nodata: None,
            values: vec![value; 6],
        };
        let rain: Vec<DatedRaster> = (0..10)
            .map(|i| DatedRaster {
                date: start + chrono::Duration::days(i),
                raster: grid(0.0),
            })
            .collect();
        let evaporation: Vec<DatedRaster> = (0..10)
            .map(|i| DatedRaster {
                date: start + chrono::Duration::days(i),
                raster: grid(4.0),
            })
            .collect();

        let precip = sample_point_series(point, &rain).unwrap();
        let evap = sample_point_series(point, &evaporation).unwrap();
        let crop = CropStageModel::constant(start, 0.7, 0.7, 1.2).unwrap();
        let params = SoilParameters::default();

        let result = advise(
            &params,
            &crop,
            &Inputs {
                precipitation: &precip,
                evapotranspiration: &evap,
                irrigations: &[],
                field_area_m2: 1000.0,
                start_date: start,
                end_date: None,
                initial_moisture_fraction: None,
            },
            start.and_hms_opt(0, 0, 0).unwrap(),
        )
        .unwrap();

        assert_eq!(result.trace.len(), 10);
        // 10 days of 2.8 mm/d use never reaches the 237.5 mm trigger.
        assert_eq!(result.next_irrigation, 0.0);
        assert!(!result.warning);
    }
}
