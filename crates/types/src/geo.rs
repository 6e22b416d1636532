//! Geographic point wrapper around the `geo` crate.
//!
//! Incident rows carry latitude/longitude in separate columns; this module
//! gives them a single typed home and the distance functions the proximity
//! filters are built on.

use serde::{Deserialize, Serialize};

/// Distance metric for proximity calculations.
///
/// `Geodesic` measures on the WGS-84 ellipsoid and is the default. The other
/// variants trade accuracy for speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    Haversine,
    #[default]
    Geodesic,
    Rhumb,
}

/// A geographic point with longitude/latitude coordinates.
///
/// # Examples
///
/// ```
/// use atxtraffic_types::geo::Point;
///
/// let tower = Point::from_lat_lon(30.2862, -97.7394);
/// assert_eq!(tower.lat(), 30.2862);
/// assert_eq!(tower.lon(), -97.7394);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    inner: geo::Point<f64>,
}

impl Point {
    /// Create a new point from x (longitude) and y (latitude) coordinates.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            inner: geo::Point::new(x, y),
        }
    }

    /// Create a point from latitude and longitude, in that order.
    #[inline]
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self::new(lon, lat)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.inner.x()
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.inner.y()
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.x()
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.y()
    }

    /// Access the inner `geo::Point`.
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }

    /// Haversine (spherical) distance to another point in meters.
    #[inline]
    pub fn haversine_distance(&self, other: &Point) -> f64 {
        use geo::Distance;
        geo::Haversine.distance(self.inner, other.inner)
    }

    /// Geodesic distance on the WGS-84 ellipsoid in meters.
    ///
    /// # Examples
    ///
    /// ```
    /// use atxtraffic_types::geo::Point;
    ///
    /// let capitol = Point::from_lat_lon(30.2747, -97.7404);
    /// let campus = Point::from_lat_lon(30.2849, -97.7341);
    /// let meters = capitol.geodesic_distance(&campus);
    /// assert!(meters > 1_000.0 && meters < 1_400.0);
    /// ```
    #[inline]
    pub fn geodesic_distance(&self, other: &Point) -> f64 {
        use geo::Distance;
        geo::Geodesic.distance(self.inner, other.inner)
    }

    /// Rhumb-line distance to another point in meters.
    #[inline]
    pub fn rhumb_distance(&self, other: &Point) -> f64 {
        use geo::Distance;
        geo::Rhumb.distance(self.inner, other.inner)
    }

    /// Distance to another point in meters using the given metric.
    pub fn distance(&self, other: &Point, metric: DistanceMetric) -> f64 {
        match metric {
            DistanceMetric::Haversine => self.haversine_distance(other),
            DistanceMetric::Geodesic => self.geodesic_distance(other),
            DistanceMetric::Rhumb => self.rhumb_distance(other),
        }
    }
}

impl From<geo::Point<f64>> for Point {
    fn from(point: geo::Point<f64>) -> Self {
        Self { inner: point }
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(point: Point) -> Self {
        point.inner
    }
}
