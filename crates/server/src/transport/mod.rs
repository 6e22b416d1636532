//! Transport layer for the incident API.
//!
//! - `http` - axum router and server loop

pub mod http;
