//! Output module: turns the joined frame into typed rows and writes the CSV.
//!
//! Writing goes through the `csv` crate with serde rather than Polars' writer.
//! Nulls and NaN become empty fields, infinities are written as `inf`, and
//! other floats use shortest round-trip text.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::emissions::{CALENDAR_YEAR, COUNTY, TOTAL_GHG_EMISSIONS};
use crate::pipeline::{EMISSIONS_PER_PERSON, OUTPUT_COLUMNS};
use crate::population::POPULATION;

/// One output row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub county: String,
    pub calendar_year: i64,
    pub total_ghg_emissions: f64,
    pub population: Option<f64>,
    pub emissions_per_person: Option<f64>,
}

/// Extract typed output rows from the joined DataFrame.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<OutputRecord>> {
    let counties = df.column(COUNTY)?.str()?;
    let years = df.column(CALENDAR_YEAR)?.i64()?;
    let total = df.column(TOTAL_GHG_EMISSIONS)?.f64()?;
    let population = df.column(POPULATION)?.f64()?;
    let per_person = df.column(EMISSIONS_PER_PERSON)?.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let county = counties
            .get(i)
            .with_context(|| format!("Null county in output row {}", i))?;
        let calendar_year = years
            .get(i)
            .with_context(|| format!("Null calendar_year for {}", county))?;
        records.push(OutputRecord {
            county: county.to_string(),
            calendar_year,
            // A group whose pollutant values were all null sums to zero.
            total_ghg_emissions: total.get(i).unwrap_or(0.0),
            population: population.get(i).filter(|v| !v.is_nan()),
            emissions_per_person: per_person.get(i).filter(|v| !v.is_nan()),
        });
    }
    Ok(records)
}

/// Write output rows with a header line, replacing any existing file.
pub fn write_output_csv(records: &[OutputRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    if records.is_empty() {
        // serde only emits the header alongside the first row
        writer.write_record(OUTPUT_COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}
