//! In-memory incident table.
//!
//! Columns are stored typed and in file order; rows are materialized only
//! for output. The table is immutable after load apart from the derived
//! hour/year columns, which are computed at most once behind a `OnceCell`.

use crate::compute::stats::summarize;
use crate::error::{Result, TrafficError};
use atxtraffic_types::stats::Description;
use atxtraffic_types::value::{ColumnType, Value};
use once_cell::sync::OnceCell;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt::Write;
use std::sync::Arc;

pub mod column;
pub mod temporal;

pub use column::{Column, ColumnData};
pub use temporal::TemporalColumns;

/// One incident row, ordered by column.
///
/// Serializes as a JSON object in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Value of the named column, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Distinct non-null values of one column in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueValues {
    pub column: String,
    pub unique_count: usize,
    pub unique_values: Vec<Value>,
}

/// Columnar incident table.
#[derive(Debug)]
pub struct Table {
    names: Arc<[String]>,
    columns: Vec<Column>,
    index: FxHashMap<String, usize>,
    row_count: usize,
    derived: OnceCell<TemporalColumns>,
}

impl Table {
    /// Assemble a table from columns of equal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(TrafficError::InvalidArgument(format!(
                "Column '{}' has {} rows, expected {}",
                bad.name(),
                bad.len(),
                row_count
            )));
        }

        let mut index = FxHashMap::default();
        for (idx, col) in columns.iter().enumerate() {
            if index.insert(col.name().to_string(), idx).is_some() {
                return Err(TrafficError::InvalidArgument(format!(
                    "Duplicate column name '{}'",
                    col.name()
                )));
            }
        }

        let names: Arc<[String]> = columns.iter().map(|c| c.name().to_string()).collect();

        Ok(Self {
            names,
            columns,
            index,
            row_count,
            derived: OnceCell::new(),
        })
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in file order.
    #[inline]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&idx| &self.columns[idx])
    }

    /// Like [`Table::column`] but fails with `ColumnNotFound`.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| TrafficError::ColumnNotFound(name.to_string()))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Materialize row `idx`. Panics if out of range.
    pub fn row(&self, idx: usize) -> Row {
        assert!(idx < self.row_count, "row {} out of range", idx);
        Row {
            columns: Arc::clone(&self.names),
            values: self.columns.iter().map(|c| c.value(idx)).collect(),
        }
    }

    /// First `min(n, row_count)` rows in file order.
    pub fn head(&self, n: usize) -> Vec<Row> {
        (0..n.min(self.row_count)).map(|i| self.row(i)).collect()
    }

    /// Statistics for every numeric column, in column order.
    pub fn describe(&self) -> Description {
        let mut desc = Description::new();
        for col in &self.columns {
            if let Some(mut values) = col.numeric_values() {
                desc.push(col.name(), summarize(&mut values));
            }
        }
        desc
    }

    /// Human-readable overview: entry range, then name, non-null count and
    /// type per column, then a tally of column types.
    pub fn summary(&self) -> String {
        let mut out = String::new();

        if self.row_count == 0 {
            out.push_str("RangeIndex: 0 entries\n");
        } else {
            let _ = writeln!(
                out,
                "RangeIndex: {} entries, 0 to {}",
                self.row_count,
                self.row_count - 1
            );
        }
        let _ = writeln!(out, "Data columns (total {} columns):", self.columns.len());

        let name_width = self
            .columns
            .iter()
            .map(|c| c.name().chars().count())
            .max()
            .unwrap_or(0)
            .max("Column".len());
        let count_width = "Non-Null Count".len();

        let _ = writeln!(
            out,
            " {:<3}  {:<name_width$}  {:<count_width$}  Dtype",
            "#", "Column", "Non-Null Count"
        );
        let _ = writeln!(
            out,
            "---  {:<name_width$}  {:<count_width$}  -----",
            "------", "--------------"
        );

        for (idx, col) in self.columns.iter().enumerate() {
            let non_null = format!("{} non-null", col.non_null_count());
            let _ = writeln!(
                out,
                " {:<3}  {:<name_width$}  {:<count_width$}  {}",
                idx,
                col.name(),
                non_null,
                col.column_type()
            );
        }

        let tally: Vec<String> = [ColumnType::Float, ColumnType::Integer, ColumnType::String]
            .iter()
            .filter_map(|ty| {
                let n = self.columns.iter().filter(|c| c.column_type() == *ty).count();
                (n > 0).then(|| format!("{}({})", ty, n))
            })
            .collect();
        let _ = writeln!(out, "dtypes: {}", tally.join(", "));

        out
    }

    /// Distinct non-null values of `column` in first-occurrence order.
    pub fn unique_values(&self, column: &str) -> Result<UniqueValues> {
        let col = self.require_column(column)?;

        let mut seen = FxHashSet::default();
        let mut unique_values = Vec::new();
        for row in 0..self.row_count {
            if let Some(key) = col.key_at(row)
                && seen.insert(key)
            {
                unique_values.push(col.value(row));
            }
        }

        Ok(UniqueValues {
            column: column.to_string(),
            unique_count: unique_values.len(),
            unique_values,
        })
    }

    /// Derive `hour` and `year` from `date_column`, at most once.
    ///
    /// Concurrent first callers block until one of them has finished, so no
    /// caller ever sees a partially populated column. The source column is
    /// fixed by the first successful call.
    pub fn ensure_hour_year(&self, date_column: &str) -> Result<&TemporalColumns> {
        if let Some(derived) = self.derived.get() {
            return Ok(derived);
        }

        let source = self
            .column(date_column)
            .ok_or_else(|| TrafficError::MissingDatasetColumns(vec![date_column.to_string()]))?;

        Ok(self.derived.get_or_init(|| {
            let derived = TemporalColumns::derive(source);
            log::debug!(
                "Derived hour/year from '{}' for {} rows ({} unparsed)",
                date_column,
                derived.len(),
                derived.unparsed()
            );
            derived
        }))
    }

    /// Derived columns, if already computed.
    pub fn derived(&self) -> Option<&TemporalColumns> {
        self.derived.get()
    }
}
