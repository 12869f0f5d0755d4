//! Calculation errors
//!
//! Every failure raised by conversion, parsing or aggregation is one variant of
//! [`NutritionError`].

use thiserror::Error;

/// Calculation error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NutritionError {
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    #[error("Invalid value/unit given: {0}")]
    InvalidFormat(String),

    #[error("Unit not given for value '{0}'")]
    MissingUnit(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Arithmetic overflow while {0}")]
    Overflow(String),
}

/// Result type for calculation operations
pub type NutritionResult<T> = Result<T, NutritionError>;
