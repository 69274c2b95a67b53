//! Property inputs, purchase financing and property file loading

mod data;
mod validate;
pub mod loader;

pub use data::{FinancingSnapshot, GeneralInputs, Property, PropertyInputs};
pub use validate::{validate_instrument_rate, validate_rate};
pub use loader::{load_default_properties, load_properties, load_properties_from_reader};
