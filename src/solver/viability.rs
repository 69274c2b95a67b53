//! Viability classification of available vs required capital

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::capital::{CapitalSolver, SolverInputs, SolverResult};

/// Default capital the investor has on hand
pub const DEFAULT_AVAILABLE_CAPITAL: f64 = 50_000_000.0;

/// Share of the original target kept by the reduced-target alternative
pub const REDUCED_TARGET_FACTOR: f64 = 0.75;

/// Down payment used by the higher-down-payment alternative
pub const RAISED_DOWN_PAYMENT: f64 = 0.40;

/// Rental yield added by the higher-yield alternative
pub const RENTAL_YIELD_STEP: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViabilityStatus {
    /// Available capital covers the requirement
    Viable,
    /// 80% to 100% covered
    AlmostViable,
    /// 50% to 80% covered
    PartiallyViable,
    /// Under 50% covered
    NotViable,
}

impl ViabilityStatus {
    pub fn from_percentage(viability_percentage: f64) -> Self {
        if viability_percentage >= 100.0 {
            ViabilityStatus::Viable
        } else if viability_percentage >= 80.0 {
            ViabilityStatus::AlmostViable
        } else if viability_percentage >= 50.0 {
            ViabilityStatus::PartiallyViable
        } else {
            ViabilityStatus::NotViable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViabilityStatus::Viable => "VIABLE",
            ViabilityStatus::AlmostViable => "ALMOST VIABLE",
            ViabilityStatus::PartiallyViable => "PARTIALLY VIABLE",
            ViabilityStatus::NotViable => "NOT VIABLE",
        }
    }

    /// Fixed recommendation for the tier, filled in with the capital gap
    pub fn recommendation(&self, capital_gap: f64) -> String {
        if *self != ViabilityStatus::Viable && capital_gap.is_nan() {
            return "The required capital could not be determined from these inputs. Review the investment parameters."
                .to_string();
        }
        match self {
            ViabilityStatus::Viable => {
                "You have enough capital for this investment. You can proceed with the purchase.".to_string()
            }
            ViabilityStatus::AlmostViable => format!(
                "You are {:.0} short of your goal. Consider adjusting your expectations or seeking additional financing.",
                capital_gap
            ),
            ViabilityStatus::PartiallyViable => format!(
                "You are {:.0} short of your goal. Consider lowering the target cash flow or increasing your available capital.",
                capital_gap
            ),
            ViabilityStatus::NotViable => format!(
                "You are {:.0} short of your goal. You need to raise your capital significantly or lower your cash-flow expectations.",
                capital_gap
            ),
        }
    }
}

impl fmt::Display for ViabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViabilityAnalysis {
    pub status: ViabilityStatus,
    /// available / required * 100
    pub viability_percentage: f64,
    /// max(0, required - available)
    pub capital_gap: f64,
    pub recommendation: String,
}

/// Classify how far the available capital goes toward the requirement.
///
/// The ratio is plain IEEE division: a zero requirement gives +inf (or NaN
/// when nothing is available either), and a NaN ratio falls through to
/// `NotViable`. A NaN requirement leaves the gap NaN rather than 0.
pub fn analyze_viability(required_capital: f64, available_capital: f64) -> ViabilityAnalysis {
    let viability_percentage = available_capital / required_capital * 100.0;
    let shortfall = required_capital - available_capital;
    let capital_gap = if shortfall.is_nan() { f64::NAN } else { shortfall.max(0.0) };
    let status = ViabilityStatus::from_percentage(viability_percentage);

    ViabilityAnalysis {
        status,
        viability_percentage,
        capital_gap,
        recommendation: status.recommendation(capital_gap),
    }
}

/// A solve together with its viability classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViabilityReport {
    pub inputs: SolverInputs,
    pub available_capital: f64,
    pub result: SolverResult,
    pub analysis: ViabilityAnalysis,
}

/// Solve for the required capital and classify it against what is available
pub fn assess_viability(inputs: &SolverInputs, available_capital: f64) -> ViabilityReport {
    let result = CapitalSolver::new(*inputs).solve();
    let analysis = analyze_viability(result.total_required_capital, available_capital);

    ViabilityReport {
        inputs: *inputs,
        available_capital,
        result,
        analysis,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeScenario {
    pub name: String,
    pub report: ViabilityReport,
}

/// Re-solve three variants of the base inputs: a 25% lower target, a 40%
/// down payment and one extra point of rental yield.
pub fn generate_alternative_scenarios(base: &SolverInputs, available_capital: f64) -> Vec<AlternativeScenario> {
    let reduced_target = SolverInputs {
        target_monthly_cashflow: base.target_monthly_cashflow * REDUCED_TARGET_FACTOR,
        ..*base
    };
    let raised_down_payment = SolverInputs {
        down_payment_percent: RAISED_DOWN_PAYMENT,
        ..*base
    };
    let raised_yield = SolverInputs {
        expected_rental_yield: base.expected_rental_yield + RENTAL_YIELD_STEP,
        ..*base
    };

    let variants = vec![
        (
            format!("Reduce target cash flow {:.0}%", (1.0 - REDUCED_TARGET_FACTOR) * 100.0),
            reduced_target,
        ),
        (
            format!("Raise down payment to {:.0}%", RAISED_DOWN_PAYMENT * 100.0),
            raised_down_payment,
        ),
        (
            format!("Raise rental yield to {:.1}%", raised_yield.expected_rental_yield * 100.0),
            raised_yield,
        ),
    ];

    variants
        .into_par_iter()
        .map(|(name, inputs)| AlternativeScenario {
            name,
            report: assess_viability(&inputs, available_capital),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(analyze_viability(100.0, 100.0).status, ViabilityStatus::Viable);
        assert_eq!(analyze_viability(100.0, 80.0).status, ViabilityStatus::AlmostViable);
        assert_eq!(analyze_viability(100.0, 79.999).status, ViabilityStatus::PartiallyViable);
        assert_eq!(analyze_viability(100.0, 50.0).status, ViabilityStatus::PartiallyViable);
        assert_eq!(analyze_viability(100.0, 49.999).status, ViabilityStatus::NotViable);
    }

    #[test]
    fn test_capital_gap() {
        let short = analyze_viability(100_000_000.0, 60_000_000.0);
        assert_eq!(short.capital_gap, 40_000_000.0);
        assert!((short.viability_percentage - 60.0).abs() < 1e-9);
        assert!(short.recommendation.contains("40000000"));

        let covered = analyze_viability(60_000_000.0, 100_000_000.0);
        assert_eq!(covered.capital_gap, 0.0);
        assert_eq!(covered.status.label(), "VIABLE");
    }

    #[test]
    fn test_zero_requirement() {
        let covered = analyze_viability(0.0, 1_000_000.0);
        assert_eq!(covered.status, ViabilityStatus::Viable);
        assert_eq!(covered.viability_percentage, f64::INFINITY);

        // 0 / 0 keeps its NaN ratio and lands in the lowest tier
        let empty = analyze_viability(0.0, 0.0);
        assert!(empty.viability_percentage.is_nan());
        assert_eq!(empty.status, ViabilityStatus::NotViable);
        assert_eq!(empty.capital_gap, 0.0);
    }

    #[test]
    fn test_undetermined_requirement() {
        let analysis = analyze_viability(f64::NAN, 50_000_000.0);

        assert!(analysis.viability_percentage.is_nan());
        assert_eq!(analysis.status, ViabilityStatus::NotViable);
        assert!(analysis.capital_gap.is_nan());
        assert!(analysis.recommendation.starts_with("The required capital could not be determined"));
    }

    #[test]
    fn test_alternative_scenarios() {
        let base = SolverInputs {
            expected_rental_yield: 0.10,
            interest_rate: 0.05,
            down_payment_percent: 0.5,
            ..SolverInputs::default()
        };
        let alternatives = generate_alternative_scenarios(&base, DEFAULT_AVAILABLE_CAPITAL);

        assert_eq!(alternatives.len(), 3);
        assert_eq!(alternatives[0].name, "Reduce target cash flow 25%");
        assert_eq!(alternatives[1].name, "Raise down payment to 40%");
        assert_eq!(alternatives[2].name, "Raise rental yield to 11.0%");

        assert!((alternatives[0].report.inputs.target_monthly_cashflow - 1_500_000.0).abs() < 1e-6);
        assert_eq!(alternatives[1].report.inputs.down_payment_percent, 0.40);

        // A lower target needs a cheaper property than the base case
        let base_report = assess_viability(&base, DEFAULT_AVAILABLE_CAPITAL);
        assert!(
            alternatives[0].report.result.required_property_value < base_report.result.required_property_value
        );
        assert!(
            alternatives[2].report.result.required_property_value < base_report.result.required_property_value
        );
    }
}
