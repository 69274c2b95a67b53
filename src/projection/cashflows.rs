//! Cashflow output structures for projections

use serde::{Deserialize, Serialize};

use crate::property::{FinancingSnapshot, GeneralInputs};

/// One year of projected property cash flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualCashFlowRecord {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Gross rent collected, inflated from the year-1 baseline
    pub gross_annual_rent: f64,

    /// Tax + maintenance + insurance, scaled by the appreciated property value
    pub variable_expenses: f64,

    /// Administration fees, inflated like rent
    pub fixed_expenses: f64,

    /// Mortgage service; 0 after the loan term or when nothing is financed
    pub mortgage_payment: f64,

    /// rent - variable - fixed - mortgage
    pub net_cash_flow: f64,
}

impl AnnualCashFlowRecord {
    pub fn total_expenses(&self) -> f64 {
        self.variable_expenses + self.fixed_expenses
    }
}

/// Complete projection of one property under one valuation rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Annual appreciation rate used to scale operating costs
    pub valuation_rate: f64,

    /// Horizon the projection covers; `cashflows` holds one record per year
    pub investment_years: u32,

    /// Mortgage term the payment was computed over
    pub loan_term_years: u32,

    /// Purchase financing the projection was run against
    pub financing: FinancingSnapshot,

    /// Fixed payment charged each year inside the loan term
    pub annual_mortgage_payment: f64,

    /// Yearly records, one per horizon year
    pub cashflows: Vec<AnnualCashFlowRecord>,
}

impl ProjectionResult {
    pub fn new(
        valuation_rate: f64,
        general: &GeneralInputs,
        financing: FinancingSnapshot,
        annual_mortgage_payment: f64,
    ) -> Self {
        Self {
            valuation_rate,
            investment_years: general.investment_years,
            loan_term_years: general.loan_term_years,
            financing,
            annual_mortgage_payment,
            cashflows: Vec::new(),
        }
    }

    /// Add a yearly record
    pub fn add_row(&mut self, row: AnnualCashFlowRecord) {
        self.cashflows.push(row);
    }

    /// Sum of net cash flow over the horizon
    pub fn accumulated_cash_flow(&self) -> f64 {
        self.cashflows.iter().map(|r| r.net_cash_flow).sum()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            total_years: self.cashflows.len() as u32,
            total_rent: self.cashflows.iter().map(|r| r.gross_annual_rent).sum(),
            total_variable_expenses: self.cashflows.iter().map(|r| r.variable_expenses).sum(),
            total_fixed_expenses: self.cashflows.iter().map(|r| r.fixed_expenses).sum(),
            total_mortgage_payments: self.cashflows.iter().map(|r| r.mortgage_payment).sum(),
            total_net_cash_flow: self.accumulated_cash_flow(),
            final_year_net_cash_flow: self.cashflows.last().map(|r| r.net_cash_flow).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_rent: f64,
    pub total_variable_expenses: f64,
    pub total_fixed_expenses: f64,
    pub total_mortgage_payments: f64,
    pub total_net_cash_flow: f64,
    pub final_year_net_cash_flow: f64,
}
