//! Inverse solve: property value and capital needed for a target cash flow

mod capital;
mod viability;

pub use capital::{
    CapitalSolver, CashflowBreakdown, FallbackReason, SolveOutcome, SolverInputs, SolverResult,
    calculate_required_capital,
    FALLBACK_MORTGAGE_YIELD, INITIAL_UPPER_BOUND, LOWER_BOUND, MAX_BISECTION_ITERATIONS,
    MAX_BRACKET_PROBES, TOLERANCE,
};
pub use viability::{
    AlternativeScenario, ViabilityAnalysis, ViabilityReport, ViabilityStatus,
    analyze_viability, assess_viability, generate_alternative_scenarios,
    DEFAULT_AVAILABLE_CAPITAL, RAISED_DOWN_PAYMENT, REDUCED_TARGET_FACTOR, RENTAL_YIELD_STEP,
};
