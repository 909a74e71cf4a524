//! County greenhouse-gas emissions pipeline.
//!
//! Aggregates EMFAC vehicle exhaust emissions (CO2 + CH4 + N2O) per county and
//! year, joins them against a wide county population table, and derives an
//! emissions-per-person metric. The result is written as a flat CSV file.

pub mod change;
pub mod config;
pub mod data_loader;
pub mod emissions;
pub mod output;
pub mod pipeline;
pub mod population;

pub use config::PipelineConfig;
pub use output::OutputRecord;
pub use pipeline::run;
