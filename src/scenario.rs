//! Scenario runner for property reports
//!
//! Holds one set of assumptions and evaluates properties against every
//! valuation scenario, plus the liquid-instrument comparison for the equity.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::{Assumptions, LiquidInstrument};
use crate::error::AnalysisResult;
use crate::projection::amortization::compound_future_value;
use crate::projection::{AnnualCashFlowRecord, ProjectionEngine, PropertyMetrics};
use crate::property::{FinancingSnapshot, Property, PropertyInputs};

/// Metrics of one property under one valuation scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub scenario_name: String,
    pub scenario_rate: f64,
    pub metrics: PropertyMetrics,
}

/// Future value of the initial equity placed in a liquid instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentProjection {
    pub instrument: LiquidInstrument,
    pub principal: f64,
    pub future_value: f64,
}

/// Everything computed for one property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyReport {
    pub property: Property,
    pub financing: FinancingSnapshot,
    pub annual_mortgage_payment: f64,
    /// Interest over the whole loan term, independent of the horizon
    pub total_interest: f64,
    pub scenarios: Vec<ScenarioMetrics>,
    /// Rate the breakdown below was projected with
    pub breakdown_rate: f64,
    pub breakdown: Vec<AnnualCashFlowRecord>,
    pub instruments: Vec<InstrumentProjection>,
}

/// Pre-loaded scenario runner for property reports
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// for property in load_default_properties()? {
///     let report = runner.run(&property);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    assumptions: Assumptions,
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the stock market assumptions
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default_market())
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> AnalysisResult<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv()?))
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> AnalysisResult<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv_path(path)?))
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        let engine = ProjectionEngine::new(assumptions.general);
        Self { assumptions, engine }
    }

    /// Metrics for every valuation scenario
    pub fn run_scenarios(&self, property: &PropertyInputs) -> Vec<ScenarioMetrics> {
        self.assumptions
            .scenarios
            .iter()
            .map(|scenario| {
                let projection = self.engine.project_property(property, scenario.rate);
                ScenarioMetrics {
                    scenario_name: scenario.name.clone(),
                    scenario_rate: scenario.rate,
                    metrics: PropertyMetrics::from_projection(&projection, property),
                }
            })
            .collect()
    }

    /// Yearly breakdown under a named scenario
    pub fn breakdown_for(&self, property: &PropertyInputs, scenario_name: &str) -> AnalysisResult<Vec<AnnualCashFlowRecord>> {
        let scenario = self.assumptions.scenario(scenario_name)?;
        Ok(self.engine.project_property(property, scenario.rate).cashflows)
    }

    /// Compound the initial equity in each liquid instrument over the horizon
    pub fn compare_instruments(&self, financing: &FinancingSnapshot) -> Vec<InstrumentProjection> {
        let years = self.assumptions.general.investment_years as f64;
        self.assumptions
            .instruments
            .iter()
            .map(|instrument| InstrumentProjection {
                instrument: instrument.clone(),
                principal: financing.initial_user_equity,
                future_value: compound_future_value(financing.initial_user_equity, instrument.rate, years),
            })
            .collect()
    }

    /// Full report for a single property
    pub fn run(&self, property: &Property) -> PropertyReport {
        let general = &self.assumptions.general;
        let inputs = &property.inputs;

        let breakdown_rate = self.assumptions.representative_rate();
        let projection = self.engine.project_property(inputs, breakdown_rate);
        let financing = projection.financing;

        PropertyReport {
            property: property.clone(),
            financing,
            annual_mortgage_payment: projection.annual_mortgage_payment,
            total_interest: financing.total_interest(inputs.credit_rate, general.loan_term_years),
            scenarios: self.run_scenarios(inputs),
            breakdown_rate,
            breakdown: projection.cashflows,
            instruments: self.compare_instruments(&financing),
        }
    }

    /// Reports for many properties, evaluated in parallel
    pub fn run_batch(&self, properties: &[Property]) -> Vec<PropertyReport> {
        properties.par_iter().map(|p| self.run(p)).collect()
    }

    /// Get reference to the assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::new();
        let properties = PropertyInputs::sample_projects();

        let reports = runner.run_batch(&properties);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].property.name, "Project 1");
        assert_eq!(reports[1].property.name, "Project 2");

        for report in &reports {
            assert_eq!(report.scenarios.len(), 4);
            assert_eq!(report.breakdown.len(), 10);
            assert_eq!(report.breakdown_rate, 0.065);
            assert_eq!(report.instruments.len(), 2);
        }

        // Higher appreciation should result in higher final equity
        let scenarios = &reports[0].scenarios;
        assert!(
            scenarios[3].metrics.final_equity_in_property > scenarios[0].metrics.final_equity_in_property
        );
    }

    #[test]
    fn test_instrument_comparison() {
        let runner = ScenarioRunner::new();
        let report = runner.run(&PropertyInputs::sample_projects()[0]);

        let fund = &report.instruments[0];
        assert_eq!(fund.principal, report.financing.initial_user_equity);
        let expected = fund.principal * 1.0868_f64.powf(10.0);
        assert!((fund.future_value - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_breakdown_for_named_scenario() {
        let runner = ScenarioRunner::new();
        let property = PropertyInputs::sample_projects()[0].inputs;

        let breakdown = runner.breakdown_for(&property, "Pessimistic").unwrap();
        assert_eq!(breakdown.len(), 10);
        assert!(matches!(
            runner.breakdown_for(&property, "Euphoric"),
            Err(AnalysisError::UnknownScenario(_))
        ));
    }
}
