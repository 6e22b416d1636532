//! Transport layer for the atxtraffic client
//!
//! - `http` - reqwest client for the JSON API

pub mod http;
