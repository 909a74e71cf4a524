use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::*;
use serde::de::DeserializeOwned;

/// Scan a CSV file as a LazyFrame.
/// Column types are inferred from every row, so a column whose first rows are
/// whole numbers still reads as Float64 when a fractional value shows up later.
pub fn scan_csv(path: &Path) -> Result<LazyFrame> {
    let Some(path_str) = path.to_str() else {
        bail!("CSV path is not valid UTF-8: {}", path.display());
    };
    LazyCsvReader::new(PlPath::new(path_str))
        .with_has_header(true)
        .with_infer_schema_length(None)
        .finish()
        .with_context(|| format!("Failed to read CSV: {}", path.display()))
}

/// Open a CSV file for row-by-row reading with the `csv` crate.
pub fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV: {}", path.display()))
}

/// Deserialize every row of a headed CSV file into `T`.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = open_csv(path)?;
    let mut records = Vec::new();
    for (i, result) in rdr.deserialize::<T>().enumerate() {
        let record =
            result.with_context(|| format!("Bad row {} in {}", i + 1, path.display()))?;
        records.push(record);
    }
    Ok(records)
}
