//! Derived hour/year columns.

use crate::compute::temporal::hour_and_year;
use crate::table::column::Column;
use atxtraffic_types::value::Value;

/// Hour-of-day and year derived from the publication date column.
///
/// Rows whose date fails to parse hold `None` in both vectors and never
/// match an hour or year filter.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalColumns {
    source: String,
    hour: Vec<Option<u32>>,
    year: Vec<Option<i32>>,
    unparsed: usize,
}

impl TemporalColumns {
    /// Derive hour and year for every row of `source`.
    pub fn derive(source: &Column) -> Self {
        let rows = source.len();
        let mut hour = Vec::with_capacity(rows);
        let mut year = Vec::with_capacity(rows);
        let mut unparsed = 0;

        for row in 0..rows {
            let parsed = match source.str_at(row) {
                Some(raw) => hour_and_year(raw),
                // Non-text columns (e.g. integer years) go through their display form.
                None => match source.value(row) {
                    Value::Null => None,
                    other => hour_and_year(&other.to_string()),
                },
            };

            match parsed {
                Some((h, y)) => {
                    hour.push(Some(h));
                    year.push(Some(y));
                }
                None => {
                    unparsed += 1;
                    hour.push(None);
                    year.push(None);
                }
            }
        }

        Self {
            source: source.name().to_string(),
            hour,
            year,
            unparsed,
        }
    }

    /// Name of the column the values were derived from.
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn hour(&self, row: usize) -> Option<u32> {
        self.hour.get(row).copied().flatten()
    }

    #[inline]
    pub fn year(&self, row: usize) -> Option<i32> {
        self.year.get(row).copied().flatten()
    }

    /// Rows whose date could not be parsed.
    pub fn unparsed(&self) -> usize {
        self.unparsed
    }

    pub fn len(&self) -> usize {
        self.hour.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hour.is_empty()
    }
}
