//! Error type for the loading and validation layers
//!
//! The numeric engine itself never fails: degenerate inputs produce 0, ±inf or
//! NaN by rule. Only file loading and input validation report errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error in {file} at line {line}: {reason}")]
    Parse {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("Invalid input:\n  {}", .0.join("\n  "))]
    Validation(Vec<String>),

    #[error("Unknown valuation scenario: {0}")]
    UnknownScenario(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
