//! # atxtraffic-types
//!
//! Core data types for the atxtraffic incident service.
//!
//! - **Cells**: `Value`, `ColumnType`
//! - **Geometry**: `Point`, `DistanceMetric`
//! - **Statistics**: `ColumnSummary`, `Description`, `DatasetStats`
//!
//! All output types serialize with Serde into the JSON shapes the HTTP layer
//! returns.
//!
//! ## Examples
//!
//! ```rust
//! use atxtraffic_types::geo::Point;
//! use atxtraffic_types::value::Value;
//!
//! let campus = Point::from_lat_lon(30.2895, -97.7368);
//! let nearby = Point::from_lat_lon(30.2900, -97.7370);
//! assert!(campus.geodesic_distance(&nearby) < 1_000.0);
//!
//! assert_eq!(Value::Float(2024.0).to_string(), "2024.0");
//! ```

pub mod geo;
pub mod stats;
pub mod value;
