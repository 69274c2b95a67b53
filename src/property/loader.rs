//! Load properties from a property CSV file
//!
//! Percent columns are written as percentages (12 = 12%) and converted to
//! fractions here, so the engine only ever sees fractions.

use super::{Property, PropertyInputs};
use crate::error::AnalysisResult;
use csv::Reader;
use log::info;
use std::path::Path;

/// Default path to the property file
pub const DEFAULT_PROPERTIES_PATH: &str = "data/properties.csv";

/// Raw CSV row matching properties.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PropertyID")]
    property_id: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "BaseValue")]
    base_value: f64,
    #[serde(rename = "MonthlyRent")]
    monthly_rent: f64,
    #[serde(rename = "PropertyTaxPct")]
    property_tax_pct: f64,
    #[serde(rename = "MaintenancePct")]
    maintenance_pct: f64,
    #[serde(rename = "InsurancePct")]
    insurance_pct: f64,
    #[serde(rename = "AdminFeeMonthly", default)]
    admin_fee_monthly: f64,
    #[serde(rename = "DownPaymentPct")]
    down_payment_pct: f64,
    #[serde(rename = "CreditRatePct")]
    credit_rate_pct: f64,
}

impl CsvRow {
    fn into_property(self) -> AnalysisResult<Property> {
        let inputs = PropertyInputs {
            base_value: self.base_value,
            initial_monthly_rent: self.monthly_rent,
            property_tax_percent: self.property_tax_pct / 100.0,
            maintenance_percent: self.maintenance_pct / 100.0,
            insurance_percent: self.insurance_pct / 100.0,
            admin_fee_monthly: self.admin_fee_monthly,
            down_payment_percent: self.down_payment_pct / 100.0,
            credit_rate: self.credit_rate_pct / 100.0,
        };
        inputs.validate(&self.name)?;

        Ok(Property::new(self.property_id, self.name, inputs))
    }
}

fn read_properties<R: std::io::Read>(mut reader: Reader<R>) -> AnalysisResult<Vec<Property>> {
    let mut properties = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        properties.push(row.into_property()?);
    }

    Ok(properties)
}

/// Load all properties from a CSV file
pub fn load_properties<P: AsRef<Path>>(path: P) -> AnalysisResult<Vec<Property>> {
    let path = path.as_ref();
    let properties = read_properties(Reader::from_path(path)?)?;
    info!("loaded {} properties from {}", properties.len(), path.display());
    Ok(properties)
}

/// Load properties from any reader (e.g., string buffer, stdin)
pub fn load_properties_from_reader<R: std::io::Read>(reader: R) -> AnalysisResult<Vec<Property>> {
    read_properties(Reader::from_reader(reader))
}

/// Load properties from the default data/properties.csv location
pub fn load_default_properties() -> AnalysisResult<Vec<Property>> {
    load_properties(DEFAULT_PROPERTIES_PATH)
}
