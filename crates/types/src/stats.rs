use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Descriptive statistics for one numeric column.
///
/// Statistics that are undefined for the column (everything but `count` on
/// an all-null column, `std` with fewer than two values) are `None` and
/// serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Per-column statistics in table column order.
///
/// Serializes as a JSON object keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Description {
    pub columns: Vec<(String, ColumnSummary)>,
}

impl Description {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, summary: ColumnSummary) {
        self.columns.push((column.into(), summary));
    }

    pub fn get(&self, column: &str) -> Option<&ColumnSummary> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, summary)| summary)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for Description {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, summary) in &self.columns {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Description {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DescriptionVisitor;

        impl<'de> Visitor<'de> for DescriptionVisitor {
            type Value = Description;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column name to column statistics")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Description, A::Error> {
                let mut desc = Description::new();
                while let Some((name, summary)) = access.next_entry::<String, ColumnSummary>()? {
                    desc.push(name, summary);
                }
                Ok(desc)
            }
        }

        deserializer.deserialize_map(DescriptionVisitor)
    }
}

/// Dataset dimensions and load bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetStats {
    /// Number of incident rows
    pub rows: usize,
    /// Number of source columns (derived columns excluded)
    pub columns: usize,
    /// Whether the hour/year columns have been computed
    pub derived_ready: bool,
    /// Rows whose date failed to parse (known once derived columns exist)
    pub unparsed_dates: Option<usize>,
}
