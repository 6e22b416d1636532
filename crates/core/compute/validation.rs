//! Validation for geographic coordinates and hour bounds.

use crate::error::{Result, TrafficError};
use atxtraffic_types::geo::Point;

/// Validates a point has finite longitude in [-180, 180] and latitude in [-90, 90].
///
/// # Examples
///
/// ```
/// use atxtraffic::compute::validation::validate_geographic_point;
/// use atxtraffic_types::geo::Point;
///
/// assert!(validate_geographic_point(&Point::from_lat_lon(30.29, -97.74)).is_ok());
/// assert!(validate_geographic_point(&Point::from_lat_lon(95.0, -97.74)).is_err());
/// assert!(validate_geographic_point(&Point::from_lat_lon(30.29, 200.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (lon, lat) = (point.lon(), point.lat());

    if !lon.is_finite() {
        return Err(TrafficError::InvalidArgument(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !lat.is_finite() {
        return Err(TrafficError::InvalidArgument(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(TrafficError::InvalidArgument(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(TrafficError::InvalidArgument(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    Ok(())
}

/// Non-failing variant used on row data, where bad coordinates are skipped.
#[inline]
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}

/// Validates an hour-of-day bound and narrows it to `u32`.
pub fn validate_hour(name: &str, hour: i64) -> Result<u32> {
    if !(0..=23).contains(&hour) {
        return Err(TrafficError::InvalidArgument(format!(
            "{} must be an integer between 0 and 23, got: {}",
            name, hour
        )));
    }
    Ok(hour as u32)
}
