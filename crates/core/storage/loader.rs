//! CSV loader for the incident table.

use crate::error::{Result, TrafficError};
use crate::table::{Column, Table};
use csv::ReaderBuilder;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

/// Load a CSV file with a header row into a [`Table`].
///
/// A missing or unreadable file is an `Io` error; malformed CSV (including
/// rows whose length differs from the header) is a `Csv` error.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let started = Instant::now();

    let file = File::open(path)?;
    let table = load_reader(BufReader::new(file))?;

    log::info!(
        "Loaded {} rows x {} columns from {} in {:?}",
        table.row_count(),
        table.column_count(),
        path.display(),
        started.elapsed()
    );
    Ok(table)
}

/// Load CSV data from any reader. Used for fixtures and in-memory data.
pub fn load_reader<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(TrafficError::EmptyDataset);
    }
    let names = dedupe_names(headers.iter());

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for record in rdr.records() {
        let record = record?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(Some(field.to_string()));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::infer(name, cells))
        .collect();

    Table::new(columns)
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
fn dedupe_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let headers: Vec<&str> = headers.collect();
    let mut taken: FxHashSet<String> = headers.iter().map(|name| name.to_string()).collect();

    let mut names = Vec::with_capacity(headers.len());
    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    for name in headers {
        let repeats = seen.entry(name).or_insert(0);
        if *repeats == 0 {
            names.push(name.to_string());
        } else {
            let mut suffix = *repeats;
            let mut candidate = format!("{}.{}", name, suffix);
            while taken.contains(&candidate) {
                suffix += 1;
                candidate = format!("{}.{}", name, suffix);
            }
            *repeats = suffix;
            taken.insert(candidate.clone());
            names.push(candidate);
        }
        *repeats += 1;
    }
    names
}
