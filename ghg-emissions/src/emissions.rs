//! Emissions aggregation: per-row GHG totals summed per county and year.

use std::path::Path;

use anyhow::Result;
use polars::prelude::*;

use crate::data_loader;

pub const REGION: &str = "region";
pub const COUNTY: &str = "county";
pub const CALENDAR_YEAR: &str = "calendar_year";
pub const TOTAL_GHG_EMISSIONS: &str = "total_ghg_emissions";

/// Pollutant columns summed into the GHG total (tons/year, total exhaust).
pub const POLLUTANT_COLUMNS: [&str; 3] = ["co2_totex", "ch4_totex", "n2o_totex"];

/// Scan the EMFAC emissions CSV.
pub fn load_emissions(path: &Path) -> Result<LazyFrame> {
    data_loader::scan_csv(path)
}

/// Expression for `co2_totex + ch4_totex + n2o_totex`, cast to Float64 so
/// integer-typed input columns sum the same way as float ones.
fn total_ghg_expr() -> Expr {
    let [co2, ch4, n2o] = POLLUTANT_COLUMNS.map(|name| col(name).cast(DataType::Float64));
    (co2 + ch4 + n2o).alias(TOTAL_GHG_EMISSIONS)
}

/// Group-sum the per-row GHG total by `(region, calendar_year)` and rename
/// `region` to `county`. One output row per distinct pair in the input.
///
/// Rows with a null region or year form no group and are dropped.
/// Missing input columns surface as a polars error when the frame is collected.
pub fn aggregate_emissions(lf: LazyFrame) -> LazyFrame {
    lf.with_columns([
        col(REGION).cast(DataType::String),
        col(CALENDAR_YEAR).cast(DataType::Int64),
        total_ghg_expr(),
    ])
    .filter(col(REGION).is_not_null().and(col(CALENDAR_YEAR).is_not_null()))
    .group_by([col(REGION), col(CALENDAR_YEAR)])
    .agg([col(TOTAL_GHG_EMISSIONS).sum()])
    .rename([REGION], [COUNTY], true)
}
