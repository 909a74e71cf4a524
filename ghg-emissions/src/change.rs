//! Percent change of a county metric relative to a baseline year, read back
//! from the pipeline's output CSV.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::Result;

use crate::data_loader;
use crate::output::OutputRecord;

pub const DEFAULT_BASELINE_YEAR: i64 = 2000;

/// Which output column a change is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricKind {
    Total,
    #[default]
    PerPerson,
}

impl MetricKind {
    pub fn value(&self, record: &OutputRecord) -> Option<f64> {
        let v = match self {
            MetricKind::Total => Some(record.total_ghg_emissions),
            MetricKind::PerPerson => record.emissions_per_person,
        };
        v.filter(|v| v.is_finite())
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Total => write!(f, "total_ghg_emissions"),
            MetricKind::PerPerson => write!(f, "emissions_per_person"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountyChange {
    pub county: String,
    pub calendar_year: i64,
    pub percent: f64,
}

/// Smallest and largest percent change seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeRange {
    pub min: f64,
    pub max: f64,
}

impl ChangeRange {
    /// Range before any value is seen: `min` at +inf, `max` at -inf.
    pub const EMPTY: ChangeRange = ChangeRange {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };
}

/// Numbers print the way a JavaScript console shows them.
fn js_number(v: f64) -> String {
    if v == f64::INFINITY {
        "Infinity".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        v.to_string()
    }
}

impl fmt::Display for ChangeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ min: {}, max: {} }}",
            js_number(self.min),
            js_number(self.max)
        )
    }
}

pub fn read_output_csv(path: &Path) -> Result<Vec<OutputRecord>> {
    data_loader::read_records(path)
}

/// Metric value per county in the baseline year. Later rows win on duplicates.
pub fn baseline_values(
    records: &[OutputRecord],
    metric: MetricKind,
    baseline_year: i64,
) -> BTreeMap<String, f64> {
    records
        .iter()
        .filter(|r| r.calendar_year == baseline_year)
        .filter_map(|r| metric.value(r).map(|v| (r.county.clone(), v)))
        .collect()
}

/// `(value - base) / base * 100` for every non-baseline row whose county has a
/// non-zero baseline. Rows without a finite value are skipped.
pub fn percent_changes(
    records: &[OutputRecord],
    metric: MetricKind,
    baseline_year: i64,
) -> Vec<CountyChange> {
    let baselines = baseline_values(records, metric, baseline_year);
    records
        .iter()
        .filter(|r| r.calendar_year != baseline_year)
        .filter_map(|r| {
            let value = metric.value(r)?;
            let base = *baselines.get(&r.county).filter(|b| **b != 0.0)?;
            Some(CountyChange {
                county: r.county.clone(),
                calendar_year: r.calendar_year,
                percent: (value - base) / base * 100.0,
            })
        })
        .collect()
}

/// Range of percent changes across all counties and years, `None` if no change
/// could be computed.
pub fn change_range(
    records: &[OutputRecord],
    metric: MetricKind,
    baseline_year: i64,
) -> Option<ChangeRange> {
    percent_changes(records, metric, baseline_year)
        .iter()
        .map(|c| c.percent)
        .fold(None, |acc, pct| match acc {
            None => Some(ChangeRange { min: pct, max: pct }),
            Some(r) => Some(ChangeRange {
                min: r.min.min(pct),
                max: r.max.max(pct),
            }),
        })
}
