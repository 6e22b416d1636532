//! Query configuration for the incident dataset.
//!
//! Every knob has a default matching the public HTTP contract, so
//! `Config::default()` is what the server runs with unless a config file
//! overrides it.
use serde::de::Error;
use serde::{Deserialize, Serialize};

pub use atxtraffic_types::geo::DistanceMetric;

/// Inclusive hour window, serialized as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow(pub u32, pub u32);

impl HourWindow {
    #[inline]
    pub fn start(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.1
    }

    /// Empty when `start > end`; windows never wrap past midnight.
    #[inline]
    pub fn contains(&self, hour: u32) -> bool {
        self.0 <= hour && hour <= self.1
    }
}

/// Settings for the fixed "rush hour near a point" query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RushHourConfig {
    #[serde(default = "RushHourConfig::default_latitude")]
    pub latitude: f64,

    #[serde(default = "RushHourConfig::default_longitude")]
    pub longitude: f64,

    #[serde(default = "RushHourConfig::default_year")]
    pub year: i32,

    #[serde(default = "RushHourConfig::default_windows")]
    pub windows: Vec<HourWindow>,

    /// Match cap for this query; smaller than the general cap.
    #[serde(default = "RushHourConfig::default_sample_limit")]
    pub sample_limit: usize,
}

impl RushHourConfig {
    const fn default_latitude() -> f64 {
        30.2895
    }

    const fn default_longitude() -> f64 {
        -97.7368
    }

    const fn default_year() -> i32 {
        2024
    }

    fn default_windows() -> Vec<HourWindow> {
        vec![HourWindow(7, 9), HourWindow(16, 18)]
    }

    const fn default_sample_limit() -> usize {
        5
    }

    /// True if `hour` falls in any configured window.
    pub fn is_rush_hour(&self, hour: u32) -> bool {
        self.windows.iter().any(|w| w.contains(hour))
    }
}

impl Default for RushHourConfig {
    fn default() -> Self {
        Self {
            latitude: Self::default_latitude(),
            longitude: Self::default_longitude(),
            year: Self::default_year(),
            windows: Self::default_windows(),
            sample_limit: Self::default_sample_limit(),
        }
    }
}

/// Dataset and query configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Match cap for `/` and the value/hour/proximity filters
    #[serde(default = "Config::default_sample_limit")]
    pub sample_limit: usize,

    #[serde(default = "Config::default_date_column")]
    pub date_column: String,

    #[serde(default = "Config::default_latitude_column")]
    pub latitude_column: String,

    #[serde(default = "Config::default_longitude_column")]
    pub longitude_column: String,

    #[serde(default = "Config::default_proximity_radius")]
    pub proximity_radius_meters: f64,

    #[serde(default)]
    pub distance_metric: DistanceMetric,

    /// Compute hour/year while loading instead of on first use
    #[serde(default = "Config::default_eager_derived")]
    pub eager_derived_columns: bool,

    #[serde(default)]
    pub rush_hour: RushHourConfig,
}

impl Config {
    const fn default_sample_limit() -> usize {
        10
    }

    fn default_date_column() -> String {
        "Published Date".to_string()
    }

    fn default_latitude_column() -> String {
        "Latitude".to_string()
    }

    fn default_longitude_column() -> String {
        "Longitude".to_string()
    }

    const fn default_proximity_radius() -> f64 {
        1000.0
    }

    const fn default_eager_derived() -> bool {
        true
    }

    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        assert!(limit > 0, "Sample limit must be greater than zero");
        self.sample_limit = limit;
        self
    }

    pub fn with_proximity_radius(mut self, meters: f64) -> Self {
        self.proximity_radius_meters = meters;
        self
    }

    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    pub fn with_eager_derived_columns(mut self, eager: bool) -> Self {
        self.eager_derived_columns = eager;
        self
    }

    pub fn with_date_column(mut self, name: impl Into<String>) -> Self {
        self.date_column = name.into();
        self
    }

    pub fn with_coordinate_columns(
        mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        self.latitude_column = latitude.into();
        self.longitude_column = longitude.into();
        self
    }

    pub fn with_rush_hour(mut self, rush_hour: RushHourConfig) -> Self {
        self.rush_hour = rush_hour;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.sample_limit == 0 {
            return Err("Sample limit must be greater than zero".to_string());
        }

        if !self.proximity_radius_meters.is_finite() || self.proximity_radius_meters <= 0.0 {
            return Err(format!(
                "Proximity radius must be a positive number of meters, got: {}",
                self.proximity_radius_meters
            ));
        }

        for (name, column) in [
            ("date_column", &self.date_column),
            ("latitude_column", &self.latitude_column),
            ("longitude_column", &self.longitude_column),
        ] {
            if column.is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }

        let rush = &self.rush_hour;
        if rush.sample_limit == 0 {
            return Err("Rush hour sample limit must be greater than zero".to_string());
        }
        if !(-90.0..=90.0).contains(&rush.latitude) || !(-180.0..=180.0).contains(&rush.longitude)
        {
            return Err(format!(
                "Rush hour point out of range: ({}, {})",
                rush.latitude, rush.longitude
            ));
        }
        for window in &rush.windows {
            if window.start() > 23 || window.end() > 23 {
                return Err(format!(
                    "Rush hour window {:?} has an hour outside 0-23",
                    window
                ));
            }
            if window.start() > window.end() {
                return Err(format!(
                    "Rush hour window {:?} starts after it ends",
                    window
                ));
            }
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_limit: Self::default_sample_limit(),
            date_column: Self::default_date_column(),
            latitude_column: Self::default_latitude_column(),
            longitude_column: Self::default_longitude_column(),
            proximity_radius_meters: Self::default_proximity_radius(),
            distance_metric: DistanceMetric::default(),
            eager_derived_columns: Self::default_eager_derived(),
            rush_hour: RushHourConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.sample_limit, 10);
        assert_eq!(config.date_column, "Published Date");
        assert_eq!(config.proximity_radius_meters, 1000.0);
        assert_eq!(config.distance_metric, DistanceMetric::Geodesic);
        assert!(config.eager_derived_columns);
        assert_eq!(config.rush_hour.year, 2024);
        assert_eq!(config.rush_hour.sample_limit, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rush_hour_windows() {
        let rush = RushHourConfig::default();
        for hour in [7, 8, 9, 16, 17, 18] {
            assert!(rush.is_rush_hour(hour), "hour {hour}");
        }
        for hour in [0, 6, 10, 12, 15, 19, 23] {
            assert!(!rush.is_rush_hour(hour), "hour {hour}");
        }
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default()
            .with_sample_limit(25)
            .with_distance_metric(DistanceMetric::Haversine)
            .with_eager_derived_columns(false);

        let json = config.to_json().unwrap();
        assert!(json.contains("\"windows\": ["));
        let deserialized = Config::from_json(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{"rush_hour": {"year": 2023}}"#).unwrap();
        assert_eq!(config.rush_hour.year, 2023);
        assert_eq!(config.rush_hour.windows.len(), 2);
        assert_eq!(config.sample_limit, 10);
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::from_json(r#"{"sample_limit": 0}"#).is_err());
        assert!(Config::from_json(r#"{"proximity_radius_meters": -1.0}"#).is_err());
        assert!(Config::from_json(r#"{"rush_hour": {"windows": [[9, 7]]}}"#).is_err());
        assert!(Config::from_json(r#"{"rush_hour": {"windows": [[20, 24]]}}"#).is_err());
        assert!(Config::from_json(r#"{"rush_hour": {"latitude": 91.0}}"#).is_err());
        assert!(Config::from_json(r#"{"unknown": true}"#).is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml() {
        let config = Config::from_toml(
            r#"
            sample_limit = 20
            distance_metric = "rhumb"

            [rush_hour]
            windows = [[6, 9]]
            "#,
        )
        .unwrap();
        assert_eq!(config.sample_limit, 20);
        assert_eq!(config.distance_metric, DistanceMetric::Rhumb);
        assert_eq!(config.rush_hour.windows, vec![HourWindow(6, 9)]);

        let round_trip = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(round_trip, config);
    }
}
