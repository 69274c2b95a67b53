//! Core projection engine for annual property cash flows

use crate::property::{FinancingSnapshot, GeneralInputs, PropertyInputs};
use super::amortization::{annual_mortgage_payment, growth_factor};
use super::cashflows::{AnnualCashFlowRecord, ProjectionResult};

/// Main projection engine
///
/// Holds the horizon and market parameters; each call projects one property
/// under one valuation (appreciation) rate and returns a fresh result.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    general: GeneralInputs,
}

impl ProjectionEngine {
    pub fn new(general: GeneralInputs) -> Self {
        Self { general }
    }

    pub fn general(&self) -> &GeneralInputs {
        &self.general
    }

    /// Project every year of the investment horizon.
    ///
    /// The result holds exactly `investment_years` records (none for a zero
    /// horizon).
    pub fn project_property(&self, property: &PropertyInputs, valuation_rate: f64) -> ProjectionResult {
        let financing = FinancingSnapshot::derive(property, self.general.notary_fees_percent);
        let payment = annual_mortgage_payment(
            financing.loan_amount,
            property.credit_rate,
            self.general.loan_term_years,
        );

        let mut result = ProjectionResult::new(valuation_rate, &self.general, financing, payment);
        for year in 1..=self.general.investment_years {
            let row = self.calculate_year(property, &financing, payment, valuation_rate, year);
            result.add_row(row);
        }

        result
    }

    /// Cash flow of one year on its own, without materializing the horizon
    pub fn project_year(&self, property: &PropertyInputs, valuation_rate: f64, year: u32) -> AnnualCashFlowRecord {
        let financing = FinancingSnapshot::derive(property, self.general.notary_fees_percent);
        let payment = annual_mortgage_payment(
            financing.loan_amount,
            property.credit_rate,
            self.general.loan_term_years,
        );
        self.calculate_year(property, &financing, payment, valuation_rate, year)
    }

    fn calculate_year(
        &self,
        property: &PropertyInputs,
        financing: &FinancingSnapshot,
        payment: f64,
        valuation_rate: f64,
        year: u32,
    ) -> AnnualCashFlowRecord {
        // Year 1 is the un-inflated baseline
        let elapsed = year.saturating_sub(1);
        let inflation_factor = growth_factor(self.general.inflation_rate, elapsed);

        let gross_annual_rent = property.initial_monthly_rent * 12.0 * inflation_factor;

        // Appreciated value only scales operating costs; it is not a cash item
        let property_value_base = property.base_value * growth_factor(valuation_rate, elapsed);
        let variable_expenses = property_value_base * property.variable_expense_rate();
        let fixed_expenses = property.admin_fee_monthly * 12.0 * inflation_factor;

        let mortgage_payment = if year <= self.general.loan_term_years && financing.loan_amount > 0.0 {
            payment
        } else {
            0.0
        };

        AnnualCashFlowRecord {
            year,
            gross_annual_rent,
            variable_expenses,
            fixed_expenses,
            mortgage_payment,
            net_cash_flow: gross_annual_rent - variable_expenses - fixed_expenses - mortgage_payment,
        }
    }
}
