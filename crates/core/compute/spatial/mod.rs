//! Proximity checks for incident coordinates.

use crate::compute::validation::is_valid_coordinate;
use atxtraffic_types::geo::Point;

pub use atxtraffic_types::geo::DistanceMetric;

/// Distance between two points in meters.
#[inline]
pub fn distance_between(point1: &Point, point2: &Point, metric: DistanceMetric) -> f64 {
    point1.distance(point2, metric)
}

/// True if `point` lies within `radius` meters of `center`.
///
/// Non-finite distances never match.
///
/// # Examples
///
/// ```
/// use atxtraffic::compute::spatial::{within_radius, DistanceMetric};
/// use atxtraffic_types::geo::Point;
///
/// let campus = Point::from_lat_lon(30.2895, -97.7368);
/// let close = Point::from_lat_lon(30.29, -97.74);
/// let airport = Point::from_lat_lon(30.1975, -97.6664);
///
/// assert!(within_radius(&campus, &close, 1_000.0, DistanceMetric::Geodesic));
/// assert!(!within_radius(&campus, &airport, 1_000.0, DistanceMetric::Geodesic));
/// ```
#[inline]
pub fn within_radius(center: &Point, point: &Point, radius: f64, metric: DistanceMetric) -> bool {
    let dist = distance_between(center, point, metric);
    dist.is_finite() && dist <= radius
}

/// Build a point from a row's latitude and longitude readings.
///
/// Returns `None` when either is missing or out of range.
#[inline]
pub fn point_from_coords(lat: Option<f64>, lon: Option<f64>) -> Option<Point> {
    let (lat, lon) = (lat?, lon?);
    is_valid_coordinate(lat, lon).then(|| Point::from_lat_lon(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_boundary() {
        let center = Point::from_lat_lon(30.2895, -97.7368);
        // ~0.009 degrees of latitude is just over one kilometer.
        let inside = Point::from_lat_lon(30.2895 + 0.0089, -97.7368);
        let outside = Point::from_lat_lon(30.2895 + 0.0092, -97.7368);

        assert!(within_radius(&center, &inside, 1000.0, DistanceMetric::Geodesic));
        assert!(!within_radius(&center, &outside, 1000.0, DistanceMetric::Geodesic));
    }

    #[test]
    fn test_point_from_coords() {
        let p = point_from_coords(Some(30.29), Some(-97.74)).unwrap();
        assert_eq!(p.lat(), 30.29);
        assert_eq!(p.lon(), -97.74);

        assert!(point_from_coords(None, Some(-97.74)).is_none());
        assert!(point_from_coords(Some(30.29), None).is_none());
        assert!(point_from_coords(Some(130.0), Some(-97.74)).is_none());
        assert!(point_from_coords(Some(f64::NAN), Some(-97.74)).is_none());
    }
}
