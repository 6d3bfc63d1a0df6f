//! Problem builder error types.

use crate::types::VariableRange;
use lqp_expr::{ConstraintId, VariableId};

/// Errors that can occur while building a problem
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// Range bound is NaN or lower > upper
    InvalidRange(VariableRange),
    /// Expression references a variable the problem does not own
    UnknownVariable(VariableId),
    /// Constraint ID out of range
    UnknownConstraint(ConstraintId),
    /// Coefficient or constant is NaN or infinite
    NonFiniteCoefficient { coefficient: f64 },
}

impl ProblemError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ProblemError::InvalidRange(_) => "RANGE_INVALID",
            ProblemError::UnknownVariable(_) => "VARIABLE_UNKNOWN",
            ProblemError::UnknownConstraint(_) => "CONSTRAINT_UNKNOWN",
            ProblemError::NonFiniteCoefficient { .. } => "COEFFICIENT_NON_FINITE",
        }
    }
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::InvalidRange(range) => {
                write!(f, "[{}] Range is malformed: {:?}", self.code(), range)
            }
            ProblemError::UnknownVariable(id) => write!(
                f,
                "[{}] Variable ID {} does not belong to this problem",
                self.code(),
                id.inner()
            ),
            ProblemError::UnknownConstraint(id) => write!(
                f,
                "[{}] Constraint ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ProblemError::NonFiniteCoefficient { coefficient } => write!(
                f,
                "[{}] Coefficients must be finite (got {})",
                self.code(),
                coefficient
            ),
        }
    }
}

impl std::error::Error for ProblemError {}
