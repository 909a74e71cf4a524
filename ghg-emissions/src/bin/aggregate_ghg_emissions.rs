//! Aggregate total GHG emissions (CO2 + CH4 + N2O) by county and year, join
//! with county population and write emissions per person.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ghg_emissions::PipelineConfig;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let output_path = ghg_emissions::run(&PipelineConfig::default())?;
    println!(
        "Aggregated GHG emissions by county and year (with population) saved to {}",
        output_path.display()
    );
    Ok(())
}
