//! Dataset builder
//!
//! Chooses where the CSV comes from (a file path or any reader) and which
//! configuration the dataset runs with.

use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::{Result, TrafficError};
use crate::storage::{load_path, load_reader};
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

enum Source {
    Path(PathBuf),
    Reader(Box<dyn Read + Send>),
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

/// Builder for a [`Dataset`].
#[derive(Debug)]
pub struct DatasetBuilder {
    source: Option<Source>,
    config: Config,
}

impl DatasetBuilder {
    /// Create a new builder with the default configuration and no source.
    pub fn new() -> Self {
        Self {
            source: None,
            config: Config::default(),
        }
    }

    /// Load from a CSV file.
    pub fn path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source = Some(Source::Path(path.into()));
        self
    }

    /// Load from an in-memory or streamed CSV source.
    pub fn reader<R: Read + Send + 'static>(mut self, reader: R) -> Self {
        self.source = Some(Source::Reader(Box::new(reader)));
        self
    }

    /// Set the dataset configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load the table and build the dataset.
    pub fn build(self) -> Result<Dataset> {
        let table = match self.source {
            Some(Source::Path(path)) => load_path(path)?,
            Some(Source::Reader(reader)) => load_reader(reader)?,
            None => {
                return Err(TrafficError::InvalidConfig(
                    "No dataset source: call path() or reader() before build()".to_string(),
                ));
            }
        };
        Dataset::new(table, self.config)
    }
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
