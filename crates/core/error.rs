//! Error taxonomy for loading and querying the incident dataset.

use thiserror::Error;

/// Canonical result for the crate.
pub type Result<T> = std::result::Result<T, TrafficError>;

#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset has no header row")]
    EmptyDataset,

    /// A required request parameter was absent or empty.
    #[error("Please provide a {0} parameter.")]
    MissingParameter(String),

    /// A parameter was present but could not be used (wrong type, out of range).
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Column '{0}' not found in the dataset.")]
    ColumnNotFound(String),

    /// The dataset lacks columns a query needs to run at all.
    #[error("Dataset is missing required column(s): {}", .0.join(", "))]
    MissingDatasetColumns(Vec<String>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TrafficError {
    /// True for errors caused by the caller's input rather than the dataset.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            TrafficError::MissingParameter(_) | TrafficError::InvalidArgument(_)
        )
    }
}
