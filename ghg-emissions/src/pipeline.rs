//! Pipeline: aggregated emissions left-joined with long population, plus the
//! per-capita metric.
//!
//! Emissions stay lazy until `execute` collects the joined frame; population is
//! reshaped eagerly first. The output file is only created after collection
//! succeeds, so a failed run writes nothing.

use std::path::PathBuf;

use anyhow::Result;
use polars::prelude::*;
use tracing::info;

use crate::config::PipelineConfig;
use crate::emissions::{self, CALENDAR_YEAR, COUNTY, TOTAL_GHG_EMISSIONS};
use crate::output;
use crate::population::{self, POPULATION};

pub const EMISSIONS_PER_PERSON: &str = "emissions_per_person";

/// Output column order.
pub const OUTPUT_COLUMNS: [&str; 5] = [
    COUNTY,
    CALENDAR_YEAR,
    TOTAL_GHG_EMISSIONS,
    POPULATION,
    EMISSIONS_PER_PERSON,
];

/// Left-join aggregated emissions with long population on `(county, calendar_year)`
/// and derive `emissions_per_person`.
///
/// Every aggregated row is kept. A missing population gives a null per-capita
/// value and a zero population gives a non-finite one; neither is guarded.
/// The population key is assumed unique, duplicates fan out rows.
pub fn join_population(agg: LazyFrame, population: LazyFrame) -> LazyFrame {
    let keys = [col(COUNTY), col(CALENDAR_YEAR)];
    agg.join(
        population,
        keys.clone(),
        keys,
        JoinArgs::new(JoinType::Left),
    )
    .with_columns([(col(TOTAL_GHG_EMISSIONS) / col(POPULATION)).alias(EMISSIONS_PER_PERSON)])
    .select(OUTPUT_COLUMNS.map(col))
    .sort([COUNTY, CALENDAR_YEAR], SortMultipleOptions::default())
}

/// Build the full lazy plan from the configured input files.
pub fn build_lazy(config: &PipelineConfig) -> Result<LazyFrame> {
    let agg = emissions::aggregate_emissions(emissions::load_emissions(&config.emissions_path)?);
    let population = population::load_population_long(&config.population_path)?;
    info!(rows = population.height(), "Population reshaped");
    Ok(join_population(agg, population.lazy()))
}

/// Execute the full pipeline and collect the joined result.
pub fn execute(config: &PipelineConfig) -> Result<DataFrame> {
    let df = build_lazy(config)?.collect()?;
    info!(rows = df.height(), "Emissions aggregated and joined");
    Ok(df)
}

/// Run the pipeline end to end and write the output CSV.
/// Returns the path that was written.
pub fn run(config: &PipelineConfig) -> Result<PathBuf> {
    let df = execute(config)?;
    let records = output::records_from_frame(&df)?;
    output::write_output_csv(&records, &config.output_path)?;
    info!(
        path = %config.output_path.display(),
        rows = records.len(),
        "Output written"
    );
    Ok(config.output_path.clone())
}
