//! Scan-time building blocks: date parsing, distance checks, coordinate
//! validation, and descriptive statistics.

pub mod spatial;
pub mod stats;
pub mod temporal;
pub mod validation;
