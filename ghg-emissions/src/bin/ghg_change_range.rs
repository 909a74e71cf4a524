//! Min/max percent change in emissions per person relative to 2000, across all
//! counties and years of the aggregated output.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ghg_emissions::PipelineConfig;
use ghg_emissions::change::{self, ChangeRange, DEFAULT_BASELINE_YEAR, MetricKind};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = PipelineConfig::default();
    let records = change::read_output_csv(&config.output_path)?;
    let metric = MetricKind::default();
    info!(
        rows = records.len(),
        %metric,
        baseline = DEFAULT_BASELINE_YEAR,
        "Computing change range"
    );

    let range =
        change::change_range(&records, metric, DEFAULT_BASELINE_YEAR).unwrap_or(ChangeRange::EMPTY);
    println!("{}", range);
    Ok(())
}
