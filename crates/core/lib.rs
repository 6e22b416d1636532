//! In-memory query engine over a traffic-incident CSV.
//!
//! ## Features
//! - **Typed columnar table**: integer, float and string columns inferred at load
//! - **Descriptive statistics**: count, mean, sample std, quartiles per numeric column
//! - **Derived temporal columns**: hour and year parsed once from the publication date
//! - **Filters**: value + year, hour range, geodesic proximity, rush hour near a point
//!
//! The dataset is loaded once and never written. Derived columns are computed
//! at load by default, or lazily behind a one-time initializer.
//!
//! ```rust
//! use atxtraffic::Dataset;
//!
//! let csv = "Traffic Report ID,Published Date,Latitude,Longitude\n\
//!            R1,2024-01-10 08:15:00,30.29,-97.74\n\
//!            R2,2023-01-10 08:15:00,30.29,-97.74\n";
//! let dataset = Dataset::builder().reader(csv.as_bytes()).build()?;
//!
//! assert_eq!(dataset.shape(), (2, 4));
//! assert_eq!(dataset.filter_by_hour_range(7, 9)?.match_count, 2);
//! assert_eq!(dataset.rush_hour_near_point()?.match_count, 1);
//! # Ok::<(), atxtraffic::TrafficError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod dataset;
pub mod error;
pub mod storage;
pub mod table;

pub use builder::DatasetBuilder;
pub use config::{Config, DistanceMetric, HourWindow, RushHourConfig};
pub use dataset::{Dataset, QueryMatches};
pub use error::{Result, TrafficError};
pub use table::{Row, Table, UniqueValues};

pub use atxtraffic_types::geo::Point;
pub use atxtraffic_types::stats::{ColumnSummary, DatasetStats, Description};
pub use atxtraffic_types::value::{ColumnType, Value};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{Config, Dataset, DatasetBuilder, Result, TrafficError};

    pub use crate::{QueryMatches, Row, UniqueValues, Value};

    pub use crate::{DistanceMetric, Point};
}
