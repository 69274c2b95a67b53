//! Rental Projection - Buy-to-rent investment projections
//!
//! This library provides:
//! - Amortized-loan mathematics (payment, remaining balance, compounding)
//! - Year-by-year cash-flow projections under valuation scenarios
//! - Return metrics (ROI, CAGR, final equity, interest paid)
//! - An inverse solver for the property value and capital needed to reach a
//!   target monthly cash flow, with viability classification

pub mod error;
pub mod property;
pub mod assumptions;
pub mod projection;
pub mod solver;
pub mod scenario;

// Re-export commonly used types
pub use error::{AnalysisError, AnalysisResult};
pub use property::{FinancingSnapshot, GeneralInputs, Property, PropertyInputs};
pub use assumptions::{Assumptions, LiquidInstrument, ValuationScenario};
pub use projection::{AnnualCashFlowRecord, ProjectionEngine, ProjectionResult, PropertyMetrics};
pub use solver::{CapitalSolver, SolverInputs, SolverResult, ViabilityAnalysis, ViabilityStatus};
pub use scenario::{PropertyReport, ScenarioRunner};
