//! Expression construction and conversion errors.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A quadratic expression was used where a linear one is required.
    NotLinear { quadratic_terms: usize },
    MismatchedLengths { variables: usize, coefficients: usize },
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::NotLinear { .. } => "EXPR_NOT_LINEAR",
            ExprError::MismatchedLengths { .. } => "EXPR_MISMATCHED_LENGTHS",
        }
    }

    fn detail(&self) -> String {
        match self {
            ExprError::NotLinear { quadratic_terms } => {
                format!("expression has {quadratic_terms} quadratic term(s)")
            }
            ExprError::MismatchedLengths {
                variables,
                coefficients,
            } => format!(
                "{variables} variables but {coefficients} coefficients; lengths must match"
            ),
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.detail())
    }
}

impl std::error::Error for ExprError {}
