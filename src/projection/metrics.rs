//! Investor-facing return metrics derived from a completed projection

use serde::{Deserialize, Serialize};

use crate::property::{GeneralInputs, PropertyInputs};
use super::amortization::{growth_factor, remaining_loan_balance, total_interest};
use super::cashflows::ProjectionResult;
use super::engine::ProjectionEngine;

/// End-of-horizon metrics for one (property, valuation scenario) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyMetrics {
    /// Base value appreciated over the full horizon
    pub future_base_property_value: f64,

    /// Sum of yearly net cash flow
    pub accumulated_cash_flow: f64,

    /// Future value minus the loan still outstanding at the horizon
    pub final_equity_in_property: f64,

    /// Equity plus accumulated cash flow
    pub total_user_value: f64,

    /// Net return over the initial equity; ±inf when equity is zero
    pub roi: f64,

    /// Annualized growth of the initial equity; ±inf when equity is zero
    pub cagr: f64,

    pub remaining_loan_balance: f64,
    pub initial_user_equity: f64,
    pub annual_mortgage_payment: f64,

    /// Interest over the full loan term, never negative
    pub total_interest_paid: f64,
}

impl PropertyMetrics {
    /// Derive metrics from a projection of `property`.
    ///
    /// Horizon and loan term are the ones the projection was run with.
    pub fn from_projection(projection: &ProjectionResult, property: &PropertyInputs) -> Self {
        let horizon = projection.investment_years;
        let loan_term = projection.loan_term_years;
        let financing = &projection.financing;
        let payment = projection.annual_mortgage_payment;

        let accumulated_cash_flow = projection.accumulated_cash_flow();
        let future_base_property_value =
            property.base_value * growth_factor(projection.valuation_rate, horizon);
        let remaining_loan_balance = remaining_loan_balance(
            financing.loan_amount,
            property.credit_rate,
            loan_term,
            horizon,
            payment,
        );

        let final_equity_in_property = future_base_property_value - remaining_loan_balance;
        let total_user_value = final_equity_in_property + accumulated_cash_flow;
        let (roi, cagr) = return_ratios(financing.initial_user_equity, total_user_value, horizon);

        Self {
            future_base_property_value,
            accumulated_cash_flow,
            final_equity_in_property,
            total_user_value,
            roi,
            cagr,
            remaining_loan_balance,
            initial_user_equity: financing.initial_user_equity,
            annual_mortgage_payment: payment,
            total_interest_paid: total_interest(payment, loan_term, financing.loan_amount),
        }
    }
}

/// Project a property and derive its metrics in one call
pub fn calculate_property_metrics(
    property: &PropertyInputs,
    general: &GeneralInputs,
    valuation_rate: f64,
) -> PropertyMetrics {
    let projection = ProjectionEngine::new(*general).project_property(property, valuation_rate);
    PropertyMetrics::from_projection(&projection, property)
}

/// ROI and CAGR of `total_user_value` against the initial equity.
///
/// With positive equity a negative end value has a CAGR of exactly -1 (total
/// loss). With zero equity both ratios are the sign of the end value as an
/// infinity, or 0 when the end value is 0 too.
pub fn return_ratios(initial_user_equity: f64, total_user_value: f64, horizon_years: u32) -> (f64, f64) {
    if initial_user_equity > 0.0 {
        let multiple = total_user_value / initial_user_equity;
        let roi = (total_user_value - initial_user_equity) / initial_user_equity;
        let cagr = if horizon_years > 0 {
            if total_user_value >= 0.0 {
                multiple.powf(1.0 / horizon_years as f64) - 1.0
            } else {
                -1.0
            }
        } else {
            let flat = multiple - 1.0;
            if flat.is_finite() {
                flat
            } else {
                0.0
            }
        };
        (roi, cagr)
    } else if initial_user_equity == 0.0 {
        if total_user_value > 0.0 {
            (f64::INFINITY, f64::INFINITY)
        } else if total_user_value < 0.0 {
            (f64::NEG_INFINITY, f64::NEG_INFINITY)
        } else {
            (0.0, 0.0)
        }
    } else {
        // Negative or NaN equity never comes out of FinancingSnapshot
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn general(years: u32, loan_term: u32) -> GeneralInputs {
        GeneralInputs {
            investment_years: years,
            loan_term_years: loan_term,
            notary_fees_percent: 0.025,
            inflation_rate: 0.05,
        }
    }

    fn project_one() -> PropertyInputs {
        PropertyInputs::sample_projects()[0].inputs
    }

    #[test]
    fn test_zero_equity_ratios() {
        assert_eq!(return_ratios(0.0, 5_000_000.0, 10), (f64::INFINITY, f64::INFINITY));
        assert_eq!(return_ratios(0.0, -5_000_000.0, 10), (f64::NEG_INFINITY, f64::NEG_INFINITY));
        assert_eq!(return_ratios(0.0, 0.0, 10), (0.0, 0.0));
    }

    #[test]
    fn test_negative_value_is_total_loss() {
        let (roi, cagr) = return_ratios(10_000_000.0, -1_000_000.0, 5);
        assert_eq!(cagr, -1.0);
        assert_relative_eq!(roi, -1.1, max_relative = 1e-12);
    }

    #[test]
    fn test_cagr_doubling() {
        let (roi, cagr) = return_ratios(100.0, 400.0, 2);
        assert_relative_eq!(roi, 3.0);
        assert_relative_eq!(cagr, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_horizon_cagr() {
        let (roi, cagr) = return_ratios(100.0, 150.0, 0);
        assert_relative_eq!(roi, 0.5);
        assert_relative_eq!(cagr, 0.5);

        let (_, cagr) = return_ratios(100.0, f64::INFINITY, 0);
        assert_eq!(cagr, 0.0);
    }

    #[test]
    fn test_metrics_identities() {
        let general = general(10, 10);
        let metrics = calculate_property_metrics(&project_one(), &general, 0.065);

        // Loan term equals horizon: fully repaid
        assert_eq!(metrics.remaining_loan_balance, 0.0);
        assert_relative_eq!(
            metrics.future_base_property_value,
            227_000_000.0 * 1.065_f64.powi(10),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            metrics.total_user_value,
            metrics.final_equity_in_property + metrics.accumulated_cash_flow,
            max_relative = 1e-12
        );
        assert!(metrics.total_interest_paid > 0.0);
    }

    #[test]
    fn test_outstanding_loan_reduces_equity() {
        let general = general(5, 20);
        let metrics = calculate_property_metrics(&project_one(), &general, 0.05);

        assert!(metrics.remaining_loan_balance > 0.0);
        assert_relative_eq!(
            metrics.final_equity_in_property,
            metrics.future_base_property_value - metrics.remaining_loan_balance,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_horizon_follows_projection() {
        let short = general(5, 20);
        let projection = ProjectionEngine::new(short).project_property(&project_one(), 0.05);
        assert_eq!(projection.investment_years, 5);
        assert_eq!(projection.loan_term_years, 20);

        let metrics = PropertyMetrics::from_projection(&projection, &project_one());
        assert_relative_eq!(
            metrics.future_base_property_value,
            227_000_000.0 * 1.05_f64.powi(5),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            metrics.remaining_loan_balance,
            remaining_loan_balance(projection.financing.loan_amount, 0.12, 20, 5, projection.annual_mortgage_payment),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            metrics.accumulated_cash_flow,
            projection.summary().total_net_cash_flow,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_higher_valuation_raises_future_value() {
        let general = general(10, 10);
        let low = calculate_property_metrics(&project_one(), &general, 0.025);
        let high = calculate_property_metrics(&project_one(), &general, 0.079);

        assert!(high.future_base_property_value > low.future_base_property_value);
        // Higher appreciation also raises operating costs, so cash flow drops
        assert!(high.accumulated_cash_flow < low.accumulated_cash_flow);
    }
}
