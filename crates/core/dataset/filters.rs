//! Value, year and hour-of-day filters.

use crate::compute::validation::validate_hour;
use crate::dataset::{Dataset, QueryMatches};
use crate::error::Result;

impl Dataset {
    /// Rows whose `column` reads as `value` and whose derived year is `year`.
    ///
    /// The comparison is on the cell's display form, so `"5"` matches an
    /// integer 5 and `"30.0"` a float 30. Null cells and rows with an
    /// unparseable date never match. Returns at most `sample_limit` rows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use atxtraffic::Dataset;
    ///
    /// let csv = "Published Date,Issue Reported\n\
    ///            2024-01-10 08:15:00,Crash Urgent\n\
    ///            2023-01-10 08:15:00,Crash Urgent\n";
    /// let dataset = Dataset::builder().reader(csv.as_bytes()).build()?;
    ///
    /// let found = dataset.filter_by_value_and_year("Issue Reported", "Crash Urgent", 2024)?;
    /// assert_eq!(found.match_count, 1);
    /// # Ok::<(), atxtraffic::TrafficError>(())
    /// ```
    pub fn filter_by_value_and_year(
        &self,
        column: &str,
        value: &str,
        year: i64,
    ) -> Result<QueryMatches> {
        let col = self.table().require_column(column)?;
        let temporal = self.temporal()?;

        Ok(self.scan(self.config().sample_limit, |row| {
            temporal.year(row).is_some_and(|y| i64::from(y) == year) && col.text_equals(row, value)
        }))
    }

    /// Rows whose derived hour lies in `[start_hour, end_hour]`.
    ///
    /// Both bounds must be in 0-23. A range with `start_hour > end_hour` is
    /// empty; it does not wrap around midnight.
    pub fn filter_by_hour_range(&self, start_hour: i64, end_hour: i64) -> Result<QueryMatches> {
        let start = validate_hour("start_hour", start_hour)?;
        let end = validate_hour("end_hour", end_hour)?;
        let temporal = self.temporal()?;

        Ok(self.scan(self.config().sample_limit, |row| {
            temporal.hour(row).is_some_and(|h| start <= h && h <= end)
        }))
    }
}
