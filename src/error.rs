//! Error types shared by the engine, loaders and exporters

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MortgageError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's loan terms rather than I/O
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MortgageError::InvalidInput { .. } | MortgageError::OutOfRange { .. }
        )
    }
}

pub type MortgageResult<T> = Result<T, MortgageError>;
