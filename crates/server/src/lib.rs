//! atxtraffic server
//!
//! JSON-over-HTTP API for the Austin traffic incident dataset. Every
//! request reads the same shared, immutable [`atxtraffic::Dataset`].
//!
//! # Example
//!
//! ```ignore
//! use atxtraffic_server::run_server;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8052").await?;
//! run_server(listener, Arc::new(dataset), shutdown).await?;
//! ```

pub mod error;
pub mod handler;
pub mod protocol;
pub mod transport;

pub use error::ApiError;

// Re-export default transport for convenience
pub use transport::http::{router, run_server};
