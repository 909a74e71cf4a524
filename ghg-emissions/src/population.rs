//! County population: wide table (one column per year) reshaped to long rows.

use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::*;
use tracing::debug;

use crate::data_loader;
use crate::emissions::{CALENDAR_YEAR, COUNTY};

pub const POPULATION: &str = "population";

/// Population table as read from disk: one row per county, one cell per year.
/// Cells keep their raw text; empty cells are missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationTable {
    pub years: Vec<i64>,
    pub rows: Vec<WideRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub county: String,
    pub cells: Vec<String>,
}

/// One (county, year) population count. Always non-missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationRecord {
    pub county: String,
    pub calendar_year: i64,
    pub population: f64,
}

/// Read the wide population CSV. The header must contain a `county` column;
/// every other header is a year label and must parse as an integer.
pub fn read_population_wide(path: &Path) -> Result<PopulationTable> {
    let mut rdr = data_loader::open_csv(path)?;
    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .clone();

    let Some(county_idx) = headers.iter().position(|h| h.trim() == COUNTY) else {
        bail!("{} has no `{}` column", path.display(), COUNTY);
    };

    let years = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != county_idx)
        .map(|(_, h)| parse_year(h))
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.with_context(|| format!("Bad row in {}", path.display()))?;
        let county = record.get(county_idx).unwrap_or_default().to_string();
        let cells = record
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != county_idx)
            .map(|(_, cell)| cell.to_string())
            .collect();
        rows.push(WideRow { county, cells });
    }

    debug!(
        path = %path.display(),
        counties = rows.len(),
        years = years.len(),
        "Loaded wide population table"
    );
    Ok(PopulationTable { years, rows })
}

fn parse_year(header: &str) -> Result<i64> {
    header
        .trim()
        .parse::<i64>()
        .with_context(|| format!("Population column `{}` is not a year", header))
}

/// Tokens read as a missing value, in addition to a blank cell.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

impl PopulationTable {
    /// Melt to one record per (county, year), dropping missing cells and cells
    /// that parse to NaN. Any other cell that is not a float fails the whole reshape.
    pub fn to_long(&self) -> Result<Vec<PopulationRecord>> {
        let mut records = Vec::with_capacity(self.rows.len() * self.years.len());
        for (year_idx, &year) in self.years.iter().enumerate() {
            for row in &self.rows {
                let cell = row.cells.get(year_idx).map(String::as_str).unwrap_or("");
                if is_missing(cell) {
                    continue;
                }
                let population = cell.trim().parse::<f64>().with_context(|| {
                    format!(
                        "Population for {} in {} is not a number: {:?}",
                        row.county, year, cell
                    )
                })?;
                if population.is_nan() {
                    continue;
                }
                records.push(PopulationRecord {
                    county: row.county.clone(),
                    calendar_year: year,
                    population,
                });
            }
        }
        debug!(
            kept = records.len(),
            dropped = self.rows.len() * self.years.len() - records.len(),
            "Reshaped population to long format"
        );
        Ok(records)
    }
}

/// Build the long population DataFrame: `county`, `calendar_year`, `population`.
pub fn population_frame(records: &[PopulationRecord]) -> Result<DataFrame> {
    let counties: Vec<&str> = records.iter().map(|r| r.county.as_str()).collect();
    let years: Vec<i64> = records.iter().map(|r| r.calendar_year).collect();
    let populations: Vec<f64> = records.iter().map(|r| r.population).collect();
    let df = df!(
        COUNTY => counties,
        CALENDAR_YEAR => years,
        POPULATION => populations,
    )?;
    Ok(df)
}

/// Read, reshape and frame the population CSV in one step.
pub fn load_population_long(path: &Path) -> Result<DataFrame> {
    let table = read_population_wide(path)?;
    let records = table.to_long()?;
    population_frame(&records)
}
