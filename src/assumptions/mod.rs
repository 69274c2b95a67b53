//! Market assumptions: horizon settings, valuation scenarios and the liquid
//! instruments the down payment is compared against

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalysisError, AnalysisResult};
use crate::property::{validate_instrument_rate, validate_rate, GeneralInputs};

/// Scenario whose cash-flow breakdown is reported by default
pub const REPRESENTATIVE_SCENARIO: &str = "Realistic";

/// A named annual property-appreciation assumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationScenario {
    pub name: String,
    pub rate: f64,
}

impl ValuationScenario {
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self { name: name.into(), rate }
    }
}

/// A liquid investment the initial equity could go into instead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidInstrument {
    pub name: String,
    /// Annual effective return
    pub rate: f64,
}

impl LiquidInstrument {
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self { name: name.into(), rate }
    }
}

/// Container for all run-wide assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    pub general: GeneralInputs,
    pub scenarios: Vec<ValuationScenario>,
    pub instruments: Vec<LiquidInstrument>,
}

impl Assumptions {
    /// Stock market assumptions
    pub fn default_market() -> Self {
        Self {
            general: GeneralInputs::default(),
            scenarios: vec![
                ValuationScenario::new("Pessimistic", 0.025),
                ValuationScenario::new("Normal", 0.05),
                ValuationScenario::new(REPRESENTATIVE_SCENARIO, 0.065),
                ValuationScenario::new("Optimistic", 0.079),
            ],
            instruments: vec![
                LiquidInstrument::new("Voluntary Pension Fund", 0.0868),
                LiquidInstrument::new("High-Yield Fund", 0.1461),
            ],
        }
    }

    /// Load overrides from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> AnalysisResult<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load overrides from CSV files in a specific directory.
    ///
    /// Files that are absent keep the stock values.
    pub fn from_csv_path(path: &Path) -> AnalysisResult<Self> {
        let mut assumptions = Self::default_market();

        let general_path = path.join(loader::GENERAL_FILE);
        if general_path.exists() {
            assumptions.general = loader::load_general_inputs(&general_path, assumptions.general)?;
        }

        let scenarios_path = path.join(loader::SCENARIOS_FILE);
        if scenarios_path.exists() {
            assumptions.scenarios = loader::load_valuation_scenarios(&scenarios_path)?;
        }

        let instruments_path = path.join(loader::INSTRUMENTS_FILE);
        if instruments_path.exists() {
            assumptions.instruments = loader::load_liquid_instruments(&instruments_path)?;
        }

        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Check horizon settings and that every rate is finite
    pub fn validate(&self) -> AnalysisResult<()> {
        let mut errors = Vec::new();

        if let Err(AnalysisError::Validation(e)) = self.general.validate() {
            errors.extend(e);
        }
        let checks = self
            .scenarios
            .iter()
            .map(|s| validate_rate(&s.name, s.rate))
            .chain(self.instruments.iter().map(|i| validate_instrument_rate(&i.name, i.rate)));
        for check in checks {
            if let Err(AnalysisError::Validation(e)) = check {
                errors.extend(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::Validation(errors))
        }
    }

    /// Look up a scenario by name (case-insensitive)
    pub fn scenario(&self, name: &str) -> AnalysisResult<&ValuationScenario> {
        self.scenarios
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AnalysisError::UnknownScenario(name.to_string()))
    }

    /// Rate used for the yearly breakdown: the "Realistic" scenario, else the
    /// first scenario, else no appreciation
    pub fn representative_rate(&self) -> f64 {
        self.scenario(REPRESENTATIVE_SCENARIO)
            .ok()
            .or_else(|| self.scenarios.first())
            .map(|s| s.rate)
            .unwrap_or(0.0)
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_market()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_market() {
        let assumptions = Assumptions::default_market();

        assert_eq!(assumptions.general.investment_years, 10);
        assert_eq!(assumptions.general.loan_term_years, 10);
        assert_eq!(assumptions.scenarios.len(), 4);
        assert_eq!(assumptions.instruments.len(), 2);
        assert!(assumptions.validate().is_ok());
    }

    #[test]
    fn test_representative_rate_fallbacks() {
        let mut assumptions = Assumptions::default_market();
        assert_eq!(assumptions.representative_rate(), 0.065);

        assumptions.scenarios.retain(|s| s.name != REPRESENTATIVE_SCENARIO);
        assert_eq!(assumptions.representative_rate(), 0.025);

        assumptions.scenarios.clear();
        assert_eq!(assumptions.representative_rate(), 0.0);
    }

    #[test]
    fn test_instrument_rates_bounded() {
        let mut assumptions = Assumptions::default_market();
        assumptions.scenarios.push(ValuationScenario::new("Boom", 1.5));
        assert!(assumptions.validate().is_ok());

        assumptions.instruments.push(LiquidInstrument::new("Leveraged Fund", 1.5));
        assumptions.instruments.push(LiquidInstrument::new("Broken Fund", f64::NAN));
        match assumptions.validate() {
            Err(AnalysisError::Validation(errors)) => {
                assert_eq!(errors.len(), 2, "{:?}", errors);
                assert!(errors[0].starts_with("Leveraged Fund"));
                assert!(errors[1].starts_with("Broken Fund"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_scenario_lookup() {
        let assumptions = Assumptions::default_market();
        assert_eq!(assumptions.scenario("optimistic").unwrap().rate, 0.079);
        assert!(matches!(
            assumptions.scenario("Euphoric"),
            Err(AnalysisError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_from_csv_path_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(loader::DEFAULT_ASSUMPTIONS_PATH);
        let loaded = Assumptions::from_csv_path(&path).expect("Failed to load assumptions");
        let stock = Assumptions::default_market();

        assert_eq!(loaded.general, stock.general);
        assert_eq!(loaded.scenarios.len(), stock.scenarios.len());
        for (a, b) in loaded.scenarios.iter().zip(&stock.scenarios) {
            assert_eq!(a.name, b.name);
            assert!((a.rate - b.rate).abs() < 1e-12);
        }
        assert_eq!(loaded.instruments.len(), stock.instruments.len());
    }

    #[test]
    fn test_missing_directory_keeps_defaults() {
        let loaded = Assumptions::from_csv_path(Path::new("does/not/exist")).unwrap();
        assert_eq!(loaded, Assumptions::default_market());
    }
}
