//! Proximity filters: incidents near a point, and rush-hour incidents near
//! the configured fixed point.

use crate::compute::spatial::{point_from_coords, within_radius};
use crate::compute::validation::validate_geographic_point;
use crate::dataset::{Dataset, QueryMatches};
use crate::error::{Result, TrafficError};
use crate::table::Column;
use atxtraffic_types::geo::Point;

impl Dataset {
    /// Latitude and longitude columns, or `MissingDatasetColumns` naming
    /// whichever are absent.
    fn coordinate_columns(&self) -> Result<(&Column, &Column)> {
        let config = self.config();
        let lat = self.table().column(&config.latitude_column);
        let lon = self.table().column(&config.longitude_column);

        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            (lat, lon) => {
                let mut missing = Vec::new();
                if lat.is_none() {
                    missing.push(config.latitude_column.clone());
                }
                if lon.is_none() {
                    missing.push(config.longitude_column.clone());
                }
                Err(TrafficError::MissingDatasetColumns(missing))
            }
        }
    }

    /// True if row `idx` has usable coordinates within the configured radius
    /// of `center`. Rows with missing or invalid coordinates are skipped.
    #[inline]
    fn is_near(&self, center: &Point, lat: &Column, lon: &Column, idx: usize) -> bool {
        let config = self.config();
        point_from_coords(lat.number_at(idx), lon.number_at(idx)).is_some_and(|p| {
            within_radius(
                center,
                &p,
                config.proximity_radius_meters,
                config.distance_metric,
            )
        })
    }

    /// Rows within `proximity_radius_meters` (1 km by default) of
    /// `(lat, lon)`, measured on the WGS-84 ellipsoid by default.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use atxtraffic::Dataset;
    ///
    /// let csv = "Published Date,Latitude,Longitude\n\
    ///            2024-01-10 08:15:00,30.29,-97.74\n\
    ///            2024-01-10 08:15:00,30.20,-97.67\n\
    ///            2024-01-10 08:15:00,,\n";
    /// let dataset = Dataset::builder().reader(csv.as_bytes()).build()?;
    ///
    /// let near = dataset.nearby(30.2895, -97.7368)?;
    /// assert_eq!(near.match_count, 1);
    /// # Ok::<(), atxtraffic::TrafficError>(())
    /// ```
    pub fn nearby(&self, lat: f64, lon: f64) -> Result<QueryMatches> {
        let center = Point::from_lat_lon(lat, lon);
        validate_geographic_point(&center)?;
        let (lat_col, lon_col) = self.coordinate_columns()?;

        Ok(self.scan(self.config().sample_limit, |idx| {
            self.is_near(&center, lat_col, lon_col, idx)
        }))
    }

    /// Rush-hour incidents in the configured year near the configured point.
    ///
    /// With the default configuration: hours 7-9 or 16-18 of 2024, within
    /// 1 km of (30.2895, -97.7368), returning at most 5 rows.
    pub fn rush_hour_near_point(&self) -> Result<QueryMatches> {
        let rush = &self.config().rush_hour;
        let center = Point::from_lat_lon(rush.latitude, rush.longitude);
        let (lat_col, lon_col) = self.coordinate_columns()?;
        let temporal = self.temporal()?;

        Ok(self.scan(rush.sample_limit, |idx| {
            temporal.year(idx) == Some(rush.year)
                && temporal.hour(idx).is_some_and(|h| rush.is_rush_hour(h))
                && self.is_near(&center, lat_col, lon_col, idx)
        }))
    }
}
