use std::path::PathBuf;

pub const EMISSIONS_PATH: &str = "public/data/emfac_vehicle_data_cleaned.csv";
pub const POPULATION_PATH: &str = "public/data/california_county_population_2000_2010_2020-2024.csv";
pub const OUTPUT_PATH: &str = "public/data/county_ghg_emissions.csv";

/// Locations of the pipeline inputs and output.
/// The binaries always run with `Default`, which points at the fixed data folder
/// relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub emissions_path: PathBuf,
    pub population_path: PathBuf,
    pub output_path: PathBuf,
}

impl PipelineConfig {
    /// Config with all three files inside `dir`, using the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file_name = |p: &str| {
            PathBuf::from(p)
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_default()
        };
        Self {
            emissions_path: dir.join(file_name(EMISSIONS_PATH)),
            population_path: dir.join(file_name(POPULATION_PATH)),
            output_path: dir.join(file_name(OUTPUT_PATH)),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            emissions_path: PathBuf::from(EMISSIONS_PATH),
            population_path: PathBuf::from(POPULATION_PATH),
            output_path: PathBuf::from(OUTPUT_PATH),
        }
    }
}
