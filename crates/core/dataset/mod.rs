//! The queryable incident dataset.
//!
//! `Dataset` owns the loaded [`Table`] together with its [`Config`] and is
//! the object handed to every request handler. All query operations take
//! `&self`; the only interior mutation is the one-time derivation of the
//! hour/year columns.

use crate::builder::DatasetBuilder;
use crate::config::Config;
use crate::error::{Result, TrafficError};
use crate::table::{Row, Table, TemporalColumns, UniqueValues};
use atxtraffic_types::stats::{DatasetStats, Description};
use serde::Serialize;
use std::path::Path;

mod filters;
mod proximity;

/// Total match count plus the first matches in file order, up to a cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMatches {
    pub match_count: usize,
    pub rows: Vec<Row>,
}

/// In-memory incident dataset with its query configuration.
#[derive(Debug)]
pub struct Dataset {
    table: Table,
    config: Config,
}

impl Dataset {
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    /// Load a CSV file with the default configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().path(path.as_ref()).build()
    }

    /// Wrap an already loaded table.
    ///
    /// With `eager_derived_columns` set, hour and year are computed here. A
    /// missing date column is not fatal at load; hour/year queries report it.
    pub fn new(table: Table, config: Config) -> Result<Self> {
        config.validate().map_err(TrafficError::InvalidConfig)?;
        let dataset = Self { table, config };

        if dataset.config.eager_derived_columns {
            match dataset.temporal() {
                Ok(derived) if derived.unparsed() > 0 => log::warn!(
                    "{} of {} rows have an unparseable '{}' and are excluded from hour/year queries",
                    derived.unparsed(),
                    derived.len(),
                    derived.source()
                ),
                Ok(_) => {}
                Err(TrafficError::MissingDatasetColumns(cols)) => log::warn!(
                    "Dataset has no {:?} column; hour and year queries will fail",
                    cols
                ),
                Err(e) => return Err(e),
            }
        }

        Ok(dataset)
    }

    #[inline]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.table.row_count(), self.table.column_count())
    }

    pub fn columns(&self) -> &[String] {
        self.table.column_names()
    }

    pub fn head(&self, n: usize) -> Vec<Row> {
        self.table.head(n)
    }

    /// The default preview: first `sample_limit` rows.
    pub fn preview(&self) -> Vec<Row> {
        self.table.head(self.config.sample_limit)
    }

    pub fn info(&self) -> String {
        self.table.summary()
    }

    pub fn describe(&self) -> Description {
        self.table.describe()
    }

    pub fn unique_values(&self, column: &str) -> Result<UniqueValues> {
        self.table.unique_values(column)
    }

    pub fn stats(&self) -> DatasetStats {
        let derived = self.table.derived();
        DatasetStats {
            rows: self.table.row_count(),
            columns: self.table.column_count(),
            derived_ready: derived.is_some(),
            unparsed_dates: derived.map(TemporalColumns::unparsed),
        }
    }

    /// Hour/year columns for the configured date column.
    pub fn temporal(&self) -> Result<&TemporalColumns> {
        self.table.ensure_hour_year(&self.config.date_column)
    }

    /// Scan every row in file order, counting matches and keeping the first `limit`.
    pub(crate) fn scan(&self, limit: usize, mut matches: impl FnMut(usize) -> bool) -> QueryMatches {
        let mut match_count = 0;
        let mut rows = Vec::with_capacity(limit.min(self.table.row_count()));

        for idx in 0..self.table.row_count() {
            if matches(idx) {
                match_count += 1;
                if rows.len() < limit {
                    rows.push(self.table.row(idx));
                }
            }
        }

        QueryMatches { match_count, rows }
    }
}
