use std::fs;
use std::path::Path;

use ghg_emissions::change::{self, MetricKind};
use ghg_emissions::{OutputRecord, PipelineConfig};
use tempfile::TempDir;

const EMISSIONS_HEADER: &str = "region,calendar_year,vehicle_category,co2_totex,ch4_totex,n2o_totex";
const OUTPUT_HEADER: &str = "county,calendar_year,total_ghg_emissions,population,emissions_per_person";

fn setup(emissions_rows: &[&str], population_csv: &str) -> (TempDir, PipelineConfig) {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::in_dir(dir.path());
    let mut emissions = String::from(EMISSIONS_HEADER);
    for row in emissions_rows {
        emissions.push('\n');
        emissions.push_str(row);
    }
    emissions.push('\n');
    fs::write(&config.emissions_path, emissions).unwrap();
    fs::write(&config.population_path, population_csv).unwrap();
    (dir, config)
}

fn read_output(path: &Path) -> Vec<OutputRecord> {
    change::read_output_csv(path).unwrap()
}

#[test]
fn alameda_example_end_to_end() {
    let (_dir, config) = setup(
        &[
            "Alameda,2020,LDA,100.0,2.0,1.0",
            "Alameda,2020,LDT1,50.0,1.0,0.5",
        ],
        "county,2020\nAlameda,1000000\n",
    );

    let written = ghg_emissions::run(&config).unwrap();
    assert_eq!(written, config.output_path);

    let text = fs::read_to_string(&config.output_path).unwrap();
    assert_eq!(
        text,
        format!("{OUTPUT_HEADER}\nAlameda,2020,154.5,1000000.0,0.0001545\n")
    );
}

#[test]
fn missing_population_leaves_empty_fields() {
    let (_dir, config) = setup(
        &[
            "Alameda,2020,LDA,100.0,2.0,1.0",
            "Alpine,2020,LDA,10.0,1.0,1.0",
            "Alameda,2010,LDA,20.0,0.0,0.0",
        ],
        "county,2010,2020\nAlameda,,1000000\n",
    );

    ghg_emissions::run(&config).unwrap();
    let text = fs::read_to_string(&config.output_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            OUTPUT_HEADER,
            "Alameda,2010,20.0,,",
            "Alameda,2020,103.0,1000000.0,0.000103",
            "Alpine,2020,12.0,,",
        ]
    );
}

#[test]
fn zero_population_gives_non_finite_per_capita() {
    let (_dir, config) = setup(
        &["Sierra,2020,LDA,3.0,1.0,1.0"],
        "county,2020\nSierra,0\n",
    );

    ghg_emissions::run(&config).unwrap();
    let records = read_output(&config.output_path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].population, Some(0.0));
    assert_eq!(records[0].emissions_per_person, Some(f64::INFINITY));
}

#[test]
fn output_keys_match_emission_keys() {
    let (_dir, config) = setup(
        &[
            "Kern,2000,LDA,1.0,0.0,0.0",
            "Kern,2010,LDA,1.0,0.0,0.0",
            "Fresno,2000,LDA,1.0,0.0,0.0",
            "Kern,2000,MDV,1.0,0.0,0.0",
        ],
        // Population has extra counties and years that must not appear.
        "county,2000,2010,2020\nKern,10,20,30\nFresno,5,6,7\nInyo,1,2,3\n",
    );

    ghg_emissions::run(&config).unwrap();
    let keys: Vec<(String, i64)> = read_output(&config.output_path)
        .into_iter()
        .map(|r| (r.county, r.calendar_year))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("Fresno".to_string(), 2000),
            ("Kern".to_string(), 2000),
            ("Kern".to_string(), 2010),
        ]
    );
}

#[test]
fn input_row_order_does_not_change_output() {
    let rows = [
        "Kern,2000,LDA,1.5,0.25,0.25",
        "Fresno,2000,LDA,4.0,1.0,0.0",
        "Kern,2000,MDV,2.0,0.5,0.5",
        "Kern,2010,LDA,8.0,0.0,0.0",
    ];
    let population = "county,2000,2010\nKern,100,200\nFresno,50,\n";

    let (_a, forward) = setup(&rows, population);
    let mut reversed_rows = rows;
    reversed_rows.reverse();
    let (_b, reversed) = setup(&reversed_rows, population);

    ghg_emissions::run(&forward).unwrap();
    ghg_emissions::run(&reversed).unwrap();
    assert_eq!(
        fs::read(&forward.output_path).unwrap(),
        fs::read(&reversed.output_path).unwrap()
    );

    let kern_2000 = read_output(&forward.output_path)
        .into_iter()
        .find(|r| r.county == "Kern" && r.calendar_year == 2000)
        .unwrap();
    assert_eq!(kern_2000.total_ghg_emissions, 5.0);
}

#[test]
fn rerun_is_byte_identical() {
    let (_dir, config) = setup(
        &[
            "Kern,2000,LDA,1.0,0.1,0.01",
            "Fresno,2020,LDA,3.0,0.3,0.03",
        ],
        "county,2000,2020\nKern,839631,909235\nFresno,799407,1008654\n",
    );

    ghg_emissions::run(&config).unwrap();
    let first = fs::read(&config.output_path).unwrap();
    ghg_emissions::run(&config).unwrap();
    let second = fs::read(&config.output_path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_pollutant_column_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::in_dir(dir.path());
    fs::write(
        &config.emissions_path,
        "region,calendar_year,co2_totex,ch4_totex\nKern,2000,1.0,0.1\n",
    )
    .unwrap();
    fs::write(&config.population_path, "county,2000\nKern,10\n").unwrap();

    assert!(ghg_emissions::run(&config).is_err());
    assert!(!config.output_path.exists());
}

#[test]
fn bad_year_header_fails_the_run() {
    let (_dir, config) = setup(
        &["Kern,2000,LDA,1.0,0.0,0.0"],
        "county,2000,estimate\nKern,10,11\n",
    );

    let err = ghg_emissions::run(&config).unwrap_err();
    assert!(format!("{err:#}").contains("estimate"));
    assert!(!config.output_path.exists());
}

#[test]
fn bad_population_value_fails_the_run() {
    let (_dir, config) = setup(
        &["Kern,2000,LDA,1.0,0.0,0.0"],
        "county,2000\nKern,lots\n",
    );

    assert!(ghg_emissions::run(&config).is_err());
    assert!(!config.output_path.exists());
}

#[test]
fn na_population_tokens_are_dropped() {
    let (_dir, config) = setup(
        &["Kern,2000,LDA,1.0,0.0,0.0", "Kern,2010,LDA,2.0,0.0,0.0"],
        "county,2000,2010\nKern,n/a,NA\n",
    );

    ghg_emissions::run(&config).unwrap();
    let text = fs::read_to_string(&config.output_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec![OUTPUT_HEADER, "Kern,2000,1.0,,", "Kern,2010,2.0,,"]);
}

#[test]
fn zero_over_zero_population_is_empty_field() {
    let (_dir, config) = setup(
        &["Sierra,2020,LDA,0.0,0.0,0.0"],
        "county,2020\nSierra,0\n",
    );

    ghg_emissions::run(&config).unwrap();
    let text = fs::read_to_string(&config.output_path).unwrap();
    assert_eq!(text, format!("{OUTPUT_HEADER}\nSierra,2020,0.0,0.0,\n"));
}

#[test]
fn fractional_pollutants_after_many_integer_rows() {
    let mut rows = vec!["Kern,2000,LDA,1,0,0"; 200];
    rows.push("Kern,2000,LDA,1.5,0.25,0.001");
    let (_dir, config) = setup(&rows, "county,2000\nKern,1000\n");

    ghg_emissions::run(&config).unwrap();
    let records = read_output(&config.output_path);
    assert_eq!(records.len(), 1);
    assert!((records[0].total_ghg_emissions - 201.751).abs() < 1e-9);
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::in_dir(dir.path());
    assert!(ghg_emissions::run(&config).is_err());
}

#[test]
fn change_range_over_pipeline_output() {
    let (_dir, config) = setup(
        &[
            "Kern,2000,LDA,100.0,0.0,0.0",
            "Kern,2020,LDA,150.0,0.0,0.0",
            "Fresno,2000,LDA,40.0,0.0,0.0",
            "Fresno,2020,LDA,10.0,0.0,0.0",
        ],
        "county,2000,2020\nKern,100,100\nFresno,10,10\n",
    );

    ghg_emissions::run(&config).unwrap();
    let records = read_output(&config.output_path);
    let range = change::change_range(&records, MetricKind::PerPerson, 2000).unwrap();
    assert_eq!(range.min, -75.0);
    assert_eq!(range.max, 50.0);
}
