//! Range checks for user-supplied inputs
//!
//! The projection engine accepts anything and degrades numerically; these
//! checks belong to the input layer and report every failed check at once.

use super::data::{GeneralInputs, PropertyInputs};
use crate::error::{AnalysisError, AnalysisResult};

fn non_negative(errors: &mut Vec<String>, label: &str, value: f64) {
    if value.is_nan() || value < 0.0 {
        errors.push(format!("{} cannot be negative (got {})", label, value));
    }
}

fn within(errors: &mut Vec<String>, label: &str, value: f64, min: f64, max: f64) {
    if value.is_nan() || value < min || value > max {
        errors.push(format!("{} must be between {} and {} (got {})", label, min, max, value));
    }
}

fn into_result(errors: Vec<String>) -> AnalysisResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::Validation(errors))
    }
}

impl PropertyInputs {
    /// Check the documented input ranges; `label` prefixes each message
    pub fn validate(&self, label: &str) -> AnalysisResult<()> {
        let mut errors = Vec::new();

        if !self.base_value.is_finite() || self.base_value <= 0.0 {
            errors.push(format!("{}: base value must be positive and finite (got {})", label, self.base_value));
        }
        non_negative(&mut errors, &format!("{}: monthly rent", label), self.initial_monthly_rent);
        non_negative(&mut errors, &format!("{}: property tax", label), self.property_tax_percent);
        non_negative(&mut errors, &format!("{}: maintenance", label), self.maintenance_percent);
        non_negative(&mut errors, &format!("{}: insurance", label), self.insurance_percent);
        non_negative(&mut errors, &format!("{}: monthly admin fee", label), self.admin_fee_monthly);
        within(&mut errors, &format!("{}: down payment", label), self.down_payment_percent, 0.0, 1.0);
        within(&mut errors, &format!("{}: credit rate", label), self.credit_rate, 0.0, 1.0);

        into_result(errors)
    }
}

impl GeneralInputs {
    /// Check the documented input ranges
    pub fn validate(&self) -> AnalysisResult<()> {
        let mut errors = Vec::new();

        within(&mut errors, "notary fees", self.notary_fees_percent, 0.0, 0.2);
        within(&mut errors, "inflation rate", self.inflation_rate, -1.0, 1.0);

        into_result(errors)
    }
}

/// A scenario or instrument rate must at least be a finite number
pub fn validate_rate(label: &str, rate: f64) -> AnalysisResult<()> {
    if rate.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::Validation(vec![format!("{}: rate must be a finite number", label)]))
    }
}

/// Liquid-instrument returns must be finite and within [-1, 1]
pub fn validate_instrument_rate(label: &str, rate: f64) -> AnalysisResult<()> {
    validate_rate(label, rate)?;
    let mut errors = Vec::new();
    within(&mut errors, &format!("{}: rate", label), rate, -1.0, 1.0);
    into_result(errors)
}
