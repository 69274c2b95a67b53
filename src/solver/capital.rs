//! Required-capital solver
//!
//! Finds the property value whose first-year net cash flow meets a monthly
//! target, then reports the financing needed to buy it. Rent and operating
//! costs scale with the property value, mortgage service with the financed
//! share of it, so the target is hit by bracketing the value and bisecting.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::projection::ProjectionEngine;
use crate::property::{FinancingSnapshot, GeneralInputs, PropertyInputs};

/// Smallest property value considered
pub const LOWER_BOUND: f64 = 10_000_000.0;

/// First upper bound probed; doubled until cash flow clears the target
pub const INITIAL_UPPER_BOUND: f64 = 10_000_000_000.0;

/// Evaluations allowed while bracketing (lower bound included)
pub const MAX_BRACKET_PROBES: u32 = 50;

/// Bisection steps allowed once a bracket is found
pub const MAX_BISECTION_ITERATIONS: u32 = 30;

/// Currency tolerance on both the interval width and |f(mid)|
pub const TOLERANCE: f64 = 1_000.0;

/// Mortgage cost per unit of value assumed by the direct estimate
pub const FALLBACK_MORTGAGE_YIELD: f64 = 0.05;

/// Parameters of a required-capital solve. Rates are fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverInputs {
    pub target_monthly_cashflow: f64,
    /// Annual rent as a fraction of property value
    pub expected_rental_yield: f64,
    pub loan_term_years: u32,
    pub interest_rate: f64,
    pub down_payment_percent: f64,
    pub notary_fees_percent: f64,
    pub property_tax_percent: f64,
    pub maintenance_percent: f64,
    pub insurance_percent: f64,
    pub admin_fee_monthly: f64,
}

impl Default for SolverInputs {
    fn default() -> Self {
        Self {
            target_monthly_cashflow: 2_000_000.0,
            expected_rental_yield: 0.07,
            loan_term_years: 30,
            interest_rate: 0.12,
            down_payment_percent: 0.30,
            notary_fees_percent: 0.025,
            property_tax_percent: 0.005,
            maintenance_percent: 0.01,
            insurance_percent: 0.003,
            admin_fee_monthly: 0.0,
        }
    }
}

impl SolverInputs {
    pub fn target_annual_cashflow(&self) -> f64 {
        self.target_monthly_cashflow * 12.0
    }

    pub fn expense_rate(&self) -> f64 {
        self.property_tax_percent + self.maintenance_percent + self.insurance_percent
    }

    pub fn admin_fee_annual(&self) -> f64 {
        self.admin_fee_monthly * 12.0
    }

    /// The property these parameters describe at a given value
    pub fn property_at(&self, property_value: f64) -> PropertyInputs {
        PropertyInputs {
            base_value: property_value,
            initial_monthly_rent: property_value * self.expected_rental_yield / 12.0,
            property_tax_percent: self.property_tax_percent,
            maintenance_percent: self.maintenance_percent,
            insurance_percent: self.insurance_percent,
            admin_fee_monthly: self.admin_fee_monthly,
            down_payment_percent: self.down_payment_percent,
            credit_rate: self.interest_rate,
        }
    }

    /// Horizon settings for a single, un-inflated first year
    pub fn general_inputs(&self) -> GeneralInputs {
        GeneralInputs {
            investment_years: 1,
            loan_term_years: self.loan_term_years,
            notary_fees_percent: self.notary_fees_percent,
            inflation_rate: 0.0,
        }
    }

    /// Financing and first-year cash flow at a candidate property value
    pub fn breakdown_at(&self, property_value: f64) -> CashflowBreakdown {
        let property = self.property_at(property_value);
        let financing = FinancingSnapshot::derive(&property, self.notary_fees_percent);
        let year = ProjectionEngine::new(self.general_inputs()).project_year(&property, 0.0, 1);

        CashflowBreakdown {
            property_value,
            financing,
            annual_rent: year.gross_annual_rent,
            total_annual_expenses: year.total_expenses(),
            annual_mortgage_payment: year.mortgage_payment,
            net_annual_cashflow: year.net_cash_flow,
        }
    }
}

/// First-year figures at one property value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashflowBreakdown {
    pub property_value: f64,
    pub financing: FinancingSnapshot,
    pub annual_rent: f64,
    pub total_annual_expenses: f64,
    pub annual_mortgage_payment: f64,
    pub net_annual_cashflow: f64,
}

/// Why the solver answered with the direct estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// Cash flow never cleared the target within the probe budget
    NoUpperBound,
    /// The bounds did not straddle the target
    NoBracket,
}

/// How the reported property value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// Bisection met the tolerance
    Converged,
    /// Bisection ran out of iterations; midpoint of the last interval
    Exhausted,
    /// Direct algebraic estimate; the target may be unreachable
    Fallback(FallbackReason),
}

/// Required property value and the purchase it implies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub required_property_value: f64,
    pub notary_amount: f64,
    pub total_value_with_notary: f64,
    pub required_down_payment: f64,
    pub loan_amount: f64,
    pub monthly_rent: f64,
    pub annual_rent: f64,
    pub total_annual_expenses: f64,
    pub annual_mortgage_payment: f64,
    pub net_annual_cashflow: f64,
    pub net_monthly_cashflow: f64,
    /// Capital the investor must bring (the down payment)
    pub total_required_capital: f64,
    /// Bisection iterations performed
    pub iterations: u32,
    /// Cash-flow evaluations performed while searching
    pub evaluations: u32,
    pub outcome: SolveOutcome,
}

impl SolverResult {
    fn from_breakdown(breakdown: CashflowBreakdown, iterations: u32, evaluations: u32, outcome: SolveOutcome) -> Self {
        let financing = breakdown.financing;
        Self {
            required_property_value: breakdown.property_value,
            notary_amount: financing.notary_amount,
            total_value_with_notary: financing.total_value_with_notary,
            required_down_payment: financing.initial_user_equity,
            loan_amount: financing.loan_amount,
            monthly_rent: breakdown.annual_rent / 12.0,
            annual_rent: breakdown.annual_rent,
            total_annual_expenses: breakdown.total_annual_expenses,
            annual_mortgage_payment: breakdown.annual_mortgage_payment,
            net_annual_cashflow: breakdown.net_annual_cashflow,
            net_monthly_cashflow: breakdown.net_annual_cashflow / 12.0,
            total_required_capital: financing.initial_user_equity,
            iterations,
            evaluations,
            outcome,
        }
    }

    pub fn converged(&self) -> bool {
        self.outcome == SolveOutcome::Converged
    }
}

/// Bracket-and-bisect search for the property value meeting a cash-flow target
#[derive(Debug, Clone)]
pub struct CapitalSolver {
    inputs: SolverInputs,
}

impl CapitalSolver {
    pub fn new(inputs: SolverInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &SolverInputs {
        &self.inputs
    }

    /// Distance of the cash flow at `property_value` above the target
    pub fn shortfall(&self, property_value: f64) -> f64 {
        self.inputs.breakdown_at(property_value).net_annual_cashflow - self.inputs.target_annual_cashflow()
    }

    /// Solve for the required property value.
    ///
    /// Performs at most `MAX_BRACKET_PROBES + MAX_BISECTION_ITERATIONS`
    /// cash-flow evaluations whatever the inputs.
    pub fn solve(&self) -> SolverResult {
        let mut evaluations = 0;

        let lower = LOWER_BOUND;
        let f_lower = self.shortfall(lower);
        evaluations += 1;

        let mut upper = INITIAL_UPPER_BOUND;
        let mut f_upper = self.shortfall(upper);
        evaluations += 1;
        debug!("bracket probe: V = {:.0}, f(V) = {:.0}", upper, f_upper);

        while !(f_upper > 0.0) && evaluations < MAX_BRACKET_PROBES {
            upper *= 2.0;
            f_upper = self.shortfall(upper);
            evaluations += 1;
            debug!("bracket probe: V = {:.0}, f(V) = {:.0}", upper, f_upper);
        }

        if !(f_upper > 0.0) {
            warn!(
                "no property value up to {:.0} reaches the target; using direct estimate",
                upper
            );
            return self.fallback(FallbackReason::NoUpperBound, evaluations);
        }

        if f_lower == 0.0 {
            return self.finish(lower, 0, evaluations, SolveOutcome::Converged);
        }
        if !(f_lower * f_upper < 0.0) {
            warn!("bounds [{:.0}, {:.0}] do not bracket the target; using direct estimate", lower, upper);
            return self.fallback(FallbackReason::NoBracket, evaluations);
        }

        let mut left = lower;
        let mut right = upper;
        let mut iterations = 0;

        while iterations < MAX_BISECTION_ITERATIONS && (right - left) > TOLERANCE {
            let mid = (left + right) / 2.0;
            let f_mid = self.shortfall(mid);
            evaluations += 1;
            debug!("bisection {}: V = {:.0}, f(V) = {:.0}", iterations + 1, mid, f_mid);

            if f_mid.abs() < TOLERANCE {
                return self.finish(mid, iterations + 1, evaluations, SolveOutcome::Converged);
            }

            if f_mid * f_lower < 0.0 {
                right = mid;
            } else {
                left = mid;
            }
            iterations += 1;
        }

        let outcome = if (right - left) <= TOLERANCE {
            SolveOutcome::Converged
        } else {
            SolveOutcome::Exhausted
        };
        self.finish((left + right) / 2.0, iterations, evaluations, outcome)
    }

    /// Direct estimate: (target + fixed costs) / approximate net yield
    pub fn direct_estimate(&self) -> f64 {
        let inputs = &self.inputs;
        let net_yield = inputs.expected_rental_yield - inputs.expense_rate() - FALLBACK_MORTGAGE_YIELD;
        let estimate = (inputs.target_annual_cashflow() + inputs.admin_fee_annual()) / net_yield;

        if estimate.is_finite() {
            estimate.max(LOWER_BOUND)
        } else {
            LOWER_BOUND
        }
    }

    fn fallback(&self, reason: FallbackReason, evaluations: u32) -> SolverResult {
        let estimate = self.direct_estimate();
        self.finish(estimate, 0, evaluations, SolveOutcome::Fallback(reason))
    }

    fn finish(&self, property_value: f64, iterations: u32, evaluations: u32, outcome: SolveOutcome) -> SolverResult {
        let breakdown = self.inputs.breakdown_at(property_value);
        SolverResult::from_breakdown(breakdown, iterations, evaluations, outcome)
    }
}

/// Convenience wrapper for a one-off solve
pub fn calculate_required_capital(inputs: &SolverInputs) -> SolverResult {
    CapitalSolver::new(*inputs).solve()
}
