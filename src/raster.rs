//! In-memory raster grid and geographic point.
//!
//! The core performs no file I/O or geodesy: the caller resolves raster
//! files (GDAL, environment-driven globs, caching) and hands over decoded
//! grids. Coordinates follow the EPSG:4326 convention — latitude/longitude
//! in degrees, grid origin at the top-left corner, negative pixel height
//! for north-up grids.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A geographic point in EPSG:4326 (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A decoded single-band raster in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raster {
    /// Longitude of the top-left corner.
    pub origin_lon: f64,
    /// Latitude of the top-left corner.
    pub origin_lat: f64,
    /// Pixel width in degrees (positive, west to east).
    pub pixel_width: f64,
    /// Pixel height in degrees (negative for north-up grids).
    pub pixel_height: f64,
    pub width: usize,
    pub height: usize,
    /// Sentinel marking cells without a measurement.
    pub nodata: Option<f64>,
    /// Row-major cell values, `width * height` long.
    pub values: Vec<f64>,
}

impl Raster {
    /// Grid indices of the cell containing `point`, or `None` when the
    /// point lies outside the raster extent.
    fn cell_of(&self, point: GeoPoint) -> Option<(usize, usize)> {
        let col = (point.lon - self.origin_lon) / self.pixel_width;
        let row = (point.lat - self.origin_lat) / self.pixel_height;
        // A NaN index would otherwise cast to cell 0.
        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        Some((col, row))
    }

    /// Whether `point` falls inside the raster extent.
    pub fn covers(&self, point: GeoPoint) -> bool {
        self.cell_of(point).is_some()
    }

    /// Value of the cell containing `point`.
    ///
    /// `Ok(None)` when the cell holds the nodata sentinel; `Err(Lookup)`
    /// when the point is outside the extent.
    pub fn sample(&self, point: GeoPoint) -> Result<Option<f64>> {
        let (col, row) = self.cell_of(point).ok_or(Error::Lookup {
            lat: point.lat,
            lon: point.lon,
        })?;
        let value = self.values[row * self.width + col];
        match self.nodata {
            Some(nd) if value == nd => Ok(None),
            _ => Ok(Some(value)),
        }
    }
}

/// 3x2 grid over lon [20, 23), lat (36, 38], 1-degree cells:
///   row 0 (lat 37..38): 1 2 3
///   row 1 (lat 36..37): 4 5 6
#[cfg(test)]
pub(crate) fn test_raster() -> Raster {
    Raster {
        origin_lon: 20.0,
        origin_lat: 38.0,
        pixel_width: 1.0,
        pixel_height: -1.0,
        width: 3,
        height: 2,
        nodata: Some(-9999.0),
        values: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_reads_containing_cell() {
        let r = test_raster();
        assert_eq!(r.sample(GeoPoint::new(37.5, 20.5)).unwrap(), Some(1.0));
        assert_eq!(r.sample(GeoPoint::new(36.5, 22.5)).unwrap(), Some(6.0));
    }

    #[test]
    fn sample_outside_extent_fails() {
        let r = test_raster();
        let err = r.sample(GeoPoint::new(39.5, 20.5)).unwrap_err();
        assert!(matches!(err, Error::Lookup { .. }));
        assert!(r.sample(GeoPoint::new(37.5, 19.5)).is_err());
        assert!(r.sample(GeoPoint::new(35.5, 20.5)).is_err());
        assert!(r.sample(GeoPoint::new(37.5, 23.5)).is_err());
    }

    #[test]
    fn non_finite_coordinates_are_outside() {
        let r = test_raster();
        assert!(!r.covers(GeoPoint::new(f64::NAN, 20.5)));
        assert!(!r.covers(GeoPoint::new(37.5, f64::NAN)));
        assert!(!r.covers(GeoPoint::new(f64::INFINITY, 20.5)));
        assert!(r.sample(GeoPoint::new(37.5, f64::NAN)).is_err());
    }

    #[test]
    fn sample_nodata_cell_is_missing() {
        let mut r = test_raster();
        r.values[0] = -9999.0;
        assert_eq!(r.sample(GeoPoint::new(37.5, 20.5)).unwrap(), None);
    }

    #[test]
    fn covers_matches_sample_extent() {
        let r = test_raster();
        assert!(r.covers(GeoPoint::new(37.5, 20.5)));
        assert!(!r.covers(GeoPoint::new(37.5, 25.0)));
    }

    #[test]
    fn no_nodata_sentinel_keeps_all_values() {
        let mut r = test_raster();
        r.nodata = None;
        r.values[0] = -9999.0;
        assert_eq!(r.sample(GeoPoint::new(37.5, 20.5)).unwrap(), Some(-9999.0));
    }
}
