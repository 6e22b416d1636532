//! Typed column storage and per-column type inference.

use atxtraffic_types::value::{ColumnType, Value};

/// Cells that read as missing, matching the usual CSV export conventions.
const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Share of numeric cells above which a text column is reported at load.
const MOSTLY_NUMERIC: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Str(Vec<Option<String>>),
}

/// A named, typed column of the incident table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

/// Hashable identity of a non-null cell, used for distinct-value scans.
/// Floats compare by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CellKey<'a> {
    Int(i64),
    Float(u64),
    Str(&'a str),
}

/// Bit pattern used as a float's identity; `-0.0` folds into `0.0`.
#[inline]
fn canonical_bits(f: f64) -> u64 {
    if f == 0.0 { 0.0f64.to_bits() } else { f.to_bits() }
}

/// True if a raw CSV cell stands for a missing value.
#[inline]
pub fn is_null_marker(raw: &str) -> bool {
    NULL_MARKERS.contains(&raw.trim())
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Build a column from raw cells, inferring its type.
    ///
    /// All non-null cells parse as `i64` → integer; all parse as `f64` →
    /// float; anything else (including a column with no values) → string.
    pub fn infer(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        let name = name.into();
        let cells: Vec<Option<String>> = cells
            .into_iter()
            .map(|c| c.filter(|s| !is_null_marker(s)))
            .collect();

        let present = cells.iter().flatten().count();
        let ints: Option<Vec<Option<i64>>> = cells
            .iter()
            .map(|c| match c {
                Some(s) => s.trim().parse::<i64>().ok().map(Some),
                None => Some(None),
            })
            .collect();

        if present > 0
            && let Some(ints) = ints
        {
            return Self::new(name, ColumnData::Int(ints));
        }

        let floats: Vec<Option<Option<f64>>> = cells
            .iter()
            .map(|c| match c {
                Some(s) => s.trim().parse::<f64>().ok().map(Some),
                None => Some(None),
            })
            .collect();
        let numeric = floats.iter().filter(|f| matches!(f, Some(Some(_)))).count();

        if present > 0 && numeric == present {
            let floats = floats.into_iter().map(Option::flatten).collect();
            return Self::new(name, ColumnData::Float(floats));
        }

        if present > 0 && numeric as f64 / present as f64 >= MOSTLY_NUMERIC {
            log::warn!(
                "Column '{}' is {} of {} numeric but contains text; keeping it as string",
                name,
                numeric,
                present
            );
        }

        Self::new(name, ColumnData::Str(cells))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match &self.data {
            ColumnData::Int(_) => ColumnType::Integer,
            ColumnData::Float(_) => ColumnType::Float,
            ColumnData::Str(_) => ColumnType::String,
        }
    }

    /// Cell at `row` as an owned value; out-of-range rows read as null.
    pub fn value(&self, row: usize) -> Value {
        match &self.data {
            ColumnData::Int(v) => v.get(row).copied().flatten().into(),
            ColumnData::Float(v) => v.get(row).copied().flatten().into(),
            ColumnData::Str(v) => v.get(row).cloned().flatten().into(),
        }
    }

    /// Borrowed text of a string cell, without cloning.
    #[inline]
    pub fn str_at(&self, row: usize) -> Option<&str> {
        match &self.data {
            ColumnData::Str(v) => v.get(row).and_then(|s| s.as_deref()),
            _ => None,
        }
    }

    /// Numeric reading of a cell. Text cells are parsed, so coordinates stored
    /// in a column that fell back to string still count.
    #[inline]
    pub fn number_at(&self, row: usize) -> Option<f64> {
        match &self.data {
            ColumnData::Int(v) => v.get(row).copied().flatten().map(|x| x as f64),
            ColumnData::Float(v) => v.get(row).copied().flatten(),
            ColumnData::Str(_) => self.str_at(row).and_then(|s| s.trim().parse().ok()),
        }
    }

    /// True if the cell's display form equals `needle`. Null cells never match.
    pub fn text_equals(&self, row: usize, needle: &str) -> bool {
        match &self.data {
            ColumnData::Str(_) => self.str_at(row) == Some(needle),
            _ => self.value(row).as_text().as_deref() == Some(needle),
        }
    }

    pub fn non_null_count(&self) -> usize {
        match &self.data {
            ColumnData::Int(v) => v.iter().flatten().count(),
            ColumnData::Float(v) => v.iter().flatten().count(),
            ColumnData::Str(v) => v.iter().flatten().count(),
        }
    }

    /// Non-null values of a numeric column, or `None` for string columns.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match &self.data {
            ColumnData::Int(v) => Some(v.iter().flatten().map(|&x| x as f64).collect()),
            ColumnData::Float(v) => Some(v.iter().flatten().copied().collect()),
            ColumnData::Str(_) => None,
        }
    }

    pub(crate) fn key_at(&self, row: usize) -> Option<CellKey<'_>> {
        match &self.data {
            ColumnData::Int(v) => v.get(row).copied().flatten().map(CellKey::Int),
            ColumnData::Float(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|f| CellKey::Float(canonical_bits(f))),
            ColumnData::Str(v) => v.get(row).and_then(|s| s.as_deref()).map(CellKey::Str),
        }
    }
}
