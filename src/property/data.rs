//! Property and financing data structures
//!
//! All rates and percentages are fractions (0.12 = 12%). Currency amounts are
//! plain numbers in the smallest stated unit of the operating currency.

use serde::{Deserialize, Serialize};

use crate::projection::amortization;

/// Per-property purchase and operating parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyInputs {
    /// Purchase price before notary fees
    pub base_value: f64,

    /// Rent collected per month in year 1
    pub initial_monthly_rent: f64,

    /// Annual property tax as a fraction of property value
    pub property_tax_percent: f64,

    /// Annual maintenance as a fraction of property value
    pub maintenance_percent: f64,

    /// Annual insurance as a fraction of property value
    pub insurance_percent: f64,

    /// Monthly administration fee in year 1
    pub admin_fee_monthly: f64,

    /// Share of the total acquisition cost paid up front
    pub down_payment_percent: f64,

    /// Annual effective interest rate of the mortgage
    pub credit_rate: f64,
}

impl PropertyInputs {
    /// Combined tax + maintenance + insurance rate
    pub fn variable_expense_rate(&self) -> f64 {
        self.property_tax_percent + self.maintenance_percent + self.insurance_percent
    }

    /// The two stock properties used when no property file is given
    pub fn sample_projects() -> Vec<Property> {
        vec![
            Property::new(
                1,
                "Project 1",
                PropertyInputs {
                    base_value: 227_000_000.0,
                    initial_monthly_rent: 1_400_000.0,
                    ..Self::stock_operating_costs()
                },
            ),
            Property::new(
                2,
                "Project 2",
                PropertyInputs {
                    base_value: 408_000_000.0,
                    initial_monthly_rent: 1_900_000.0,
                    ..Self::stock_operating_costs()
                },
            ),
        ]
    }

    fn stock_operating_costs() -> Self {
        Self {
            base_value: 0.0,
            initial_monthly_rent: 0.0,
            property_tax_percent: 0.005,
            maintenance_percent: 0.01,
            insurance_percent: 0.003,
            admin_fee_monthly: 0.0,
            down_payment_percent: 0.30,
            credit_rate: 0.12,
        }
    }
}

/// Horizon and market parameters shared by every property in a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneralInputs {
    /// Investment horizon in years
    pub investment_years: u32,

    /// Mortgage term in years
    pub loan_term_years: u32,

    /// Notary and registration fees as a fraction of base value
    pub notary_fees_percent: f64,

    /// Annual inflation applied to rent and administration fees
    pub inflation_rate: f64,
}

impl Default for GeneralInputs {
    fn default() -> Self {
        Self {
            investment_years: 10,
            loan_term_years: 10,
            notary_fees_percent: 0.025,
            inflation_rate: 0.05,
        }
    }
}

/// Purchase financing derived from a property and the notary rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancingSnapshot {
    pub notary_amount: f64,
    pub total_value_with_notary: f64,
    /// Down payment; the equity the investor puts in at purchase
    pub initial_user_equity: f64,
    pub loan_amount: f64,
}

impl FinancingSnapshot {
    /// Derive financing for a purchase.
    ///
    /// Invariants: `total_value_with_notary = base_value + notary_amount` and
    /// `loan_amount = total_value_with_notary - initial_user_equity`.
    pub fn derive(property: &PropertyInputs, notary_fees_percent: f64) -> Self {
        let notary_amount = property.base_value * notary_fees_percent;
        let total_value_with_notary = property.base_value + notary_amount;
        let initial_user_equity = if property.down_payment_percent == 0.0 {
            0.0
        } else {
            total_value_with_notary * property.down_payment_percent
        };

        Self {
            notary_amount,
            total_value_with_notary,
            initial_user_equity,
            loan_amount: total_value_with_notary - initial_user_equity,
        }
    }

    /// Fixed annual payment that retires the loan over `term_years`
    pub fn annual_mortgage_payment(&self, credit_rate: f64, term_years: u32) -> f64 {
        amortization::annual_mortgage_payment(self.loan_amount, credit_rate, term_years)
    }

    /// Interest paid over the full loan term, never negative
    pub fn total_interest(&self, credit_rate: f64, term_years: u32) -> f64 {
        if self.loan_amount <= 0.0 || term_years == 0 {
            return 0.0;
        }
        let payment = self.annual_mortgage_payment(credit_rate, term_years);
        amortization::total_interest(payment, term_years, self.loan_amount)
    }
}

/// A named property as loaded from a property file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub property_id: u32,
    pub name: String,
    pub inputs: PropertyInputs,
}

impl Property {
    pub fn new(property_id: u32, name: impl Into<String>, inputs: PropertyInputs) -> Self {
        Self {
            property_id,
            name: name.into(),
            inputs,
        }
    }
}
