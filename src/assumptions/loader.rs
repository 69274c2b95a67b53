//! CSV-based assumption loader
//!
//! Loads market assumptions from CSV files in data/assumptions/. Rates are
//! written as percentages and converted to fractions.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use log::info;

use super::{LiquidInstrument, ValuationScenario};
use crate::error::{AnalysisError, AnalysisResult};
use crate::property::GeneralInputs;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

pub const GENERAL_FILE: &str = "general.csv";
pub const SCENARIOS_FILE: &str = "valuation_scenarios.csv";
pub const INSTRUMENTS_FILE: &str = "instruments.csv";

fn field<'a>(record: &'a StringRecord, index: usize, path: &Path) -> AnalysisResult<&'a str> {
    record.get(index).map(str::trim).ok_or_else(|| parse_error(record, path, format!("missing column {}", index + 1)))
}

fn parse_error(record: &StringRecord, path: &Path, reason: String) -> AnalysisError {
    AnalysisError::Parse {
        file: path.display().to_string(),
        line: record.position().map(|p| p.line()).unwrap_or(0),
        reason,
    }
}

fn parse_number<T: std::str::FromStr>(record: &StringRecord, index: usize, path: &Path) -> AnalysisResult<T>
where
    T::Err: std::fmt::Display,
{
    let raw = field(record, index, path)?;
    raw.parse()
        .map_err(|e: T::Err| parse_error(record, path, format!("invalid number '{}': {}", raw, e)))
}

/// Load (name, rate) rows, converting percent to fraction
fn load_named_rates(path: &Path) -> AnalysisResult<Vec<(String, f64)>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let name = field(&record, 0, path)?.to_string();
        let rate_pct: f64 = parse_number(&record, 1, path)?;
        rows.push((name, rate_pct / 100.0));
    }

    Ok(rows)
}

/// Load horizon settings from Key,Value rows on top of `base`
pub fn load_general_inputs(path: &Path, base: GeneralInputs) -> AnalysisResult<GeneralInputs> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut general = base;

    for result in reader.records() {
        let record = result?;
        match field(&record, 0, path)? {
            "InvestmentYears" => general.investment_years = parse_number(&record, 1, path)?,
            "LoanTermYears" => general.loan_term_years = parse_number(&record, 1, path)?,
            "NotaryFeesPct" => general.notary_fees_percent = parse_number::<f64>(&record, 1, path)? / 100.0,
            "InflationPct" => general.inflation_rate = parse_number::<f64>(&record, 1, path)? / 100.0,
            other => return Err(parse_error(&record, path, format!("unknown key '{}'", other))),
        }
    }

    Ok(general)
}

/// Load valuation scenarios from Name,RatePct rows
pub fn load_valuation_scenarios(path: &Path) -> AnalysisResult<Vec<ValuationScenario>> {
    let scenarios: Vec<_> = load_named_rates(path)?
        .into_iter()
        .map(|(name, rate)| ValuationScenario::new(name, rate))
        .collect();
    info!("loaded {} valuation scenarios", scenarios.len());
    Ok(scenarios)
}

/// Load liquid instruments from Name,RatePct rows
pub fn load_liquid_instruments(path: &Path) -> AnalysisResult<Vec<LiquidInstrument>> {
    let instruments: Vec<_> = load_named_rates(path)?
        .into_iter()
        .map(|(name, rate)| LiquidInstrument::new(name, rate))
        .collect();
    info!("loaded {} liquid instruments", instruments.len());
    Ok(instruments)
}
