//! atxtraffic client
//!
//! Typed HTTP client for the atxtraffic incident service, plus the
//! client-side rush-hour composition built from the hour-range and
//! proximity endpoints.
//!
//! # Example
//!
//! ```ignore
//! use atxtraffic_client::TrafficClient;
//!
//! let client = TrafficClient::new("http://127.0.0.1:8052")?;
//! let shape = client.shape().await?;
//! let near = client.nearby(30.2895, -97.7368).await?;
//! ```

pub mod rush_hour;
pub mod transport;

pub use rush_hour::{RushHourReport, rush_hour_near};
pub use transport::http::{ClientError, Incident, Result, TrafficClient};
