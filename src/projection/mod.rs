//! Projection engine for annual property cash flows and return metrics

pub mod amortization;
mod engine;
mod cashflows;
mod metrics;

pub use engine::ProjectionEngine;
pub use cashflows::{AnnualCashFlowRecord, ProjectionResult, ProjectionSummary};
pub use metrics::{PropertyMetrics, calculate_property_metrics, return_ratios};
