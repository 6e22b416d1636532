//! Request parameters and response bodies for the HTTP API.
//!
//! Query strings deserialize into structs of optional strings so that a
//! missing or malformed parameter reaches the handler and is rejected with
//! the JSON error body instead of a framework rejection.
//!
//! Response bodies are generic over the row and cell types: the server
//! fills them with [`Row`] and [`Value`], clients read them back as plain
//! JSON records.

use atxtraffic::{QueryMatches, Row, TrafficError, UniqueValues, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct HeadParams {
    pub count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UniqueValuesParams {
    #[serde(rename = "ColumnName")]
    pub column_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ValueAndYearParams {
    #[serde(rename = "ColumnName")]
    pub column_name: Option<String>,
    #[serde(rename = "ColumnValue")]
    pub column_value: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HourRangeParams {
    pub start_hour: Option<String>,
    pub end_hour: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeResponse {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnsResponse {
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAndYearResponse<R = Row> {
    pub column: String,
    pub value: String,
    pub year: i64,
    pub match_count: usize,
    pub matching_incidents: Vec<R>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRangeResponse<R = Row> {
    pub start_hour: i64,
    pub end_hour: i64,
    pub match_count: usize,
    pub matching_incidents: Vec<R>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyResponse<R = Row> {
    pub latitude: f64,
    pub longitude: f64,
    pub match_count: usize,
    pub matching_incidents: Vec<R>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RushHourResponse<R = Row> {
    pub total_matches: usize,
    pub sample: Vec<R>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueValuesResponse<V = Value> {
    pub column: String,
    pub unique_count: usize,
    pub unique_values: Vec<V>,
}

impl From<UniqueValues> for UniqueValuesResponse {
    fn from(unique: UniqueValues) -> Self {
        Self {
            column: unique.column,
            unique_count: unique.unique_count,
            unique_values: unique.unique_values,
        }
    }
}

impl From<QueryMatches> for RushHourResponse {
    fn from(matches: QueryMatches) -> Self {
        Self {
            total_matches: matches.match_count,
            sample: matches.rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Take a required parameter. Absent and empty values are both missing.
pub fn required(name: &str, value: Option<String>) -> Result<String, TrafficError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TrafficError::MissingParameter(name.to_string())),
    }
}

pub fn parse_int(name: &str, raw: &str) -> Result<i64, TrafficError> {
    raw.trim().parse::<i64>().map_err(|_| {
        TrafficError::InvalidArgument(format!("{} must be an integer, got '{}'.", name, raw))
    })
}

pub fn parse_float(name: &str, raw: &str) -> Result<f64, TrafficError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(TrafficError::InvalidArgument(format!(
            "{} must be a number, got '{}'.",
            name, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("count", Some("3".into())).unwrap(), "3");
        assert!(matches!(
            required("count", None),
            Err(TrafficError::MissingParameter(name)) if name == "count"
        ));
        assert!(matches!(
            required("count", Some(String::new())),
            Err(TrafficError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_int("Year", " 2024 ").unwrap(), 2024);
        assert_eq!(parse_int("count", "-1").unwrap(), -1);
        assert!(matches!(
            parse_int("Year", "20x4"),
            Err(TrafficError::InvalidArgument(_))
        ));
        assert!(parse_int("start_hour", "7.5").is_err());

        assert_eq!(parse_float("lat", "30.2895").unwrap(), 30.2895);
        assert!(parse_float("lat", "north").is_err());
        assert!(parse_float("lat", "NaN").is_err());
        assert!(parse_float("lon", "inf").is_err());
    }

    #[test]
    fn test_rush_hour_response_field_names() {
        let response: RushHourResponse = RushHourResponse::from(QueryMatches {
            match_count: 7,
            rows: Vec::new(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"total_matches": 7, "sample": []}));
    }
}
