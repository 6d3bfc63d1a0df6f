//! Builder functions for constructing linear expressions.

use crate::expr::error::ExprError;
use crate::expr::linear::LinearExpr;
use crate::ids::VariableId;

/// Sum of linear expressions (or anything convertible into one).
///
/// Repeated variables are merged, so `linear_sum([x, x])` is `2 * x`.
pub fn linear_sum<I>(items: I) -> LinearExpr
where
    I: IntoIterator,
    I::Item: Into<LinearExpr>,
{
    let mut sum = LinearExpr::zero();
    for item in items {
        sum.merge(&item.into(), 1.0);
    }
    sum
}

/// `sum(coefficients[i] * variables[i])`.
///
/// Returns an error if the slices have different lengths.
pub fn weighted_sum(variables: &[VariableId], coefficients: &[f64]) -> Result<LinearExpr, ExprError> {
    if variables.len() != coefficients.len() {
        return Err(ExprError::MismatchedLengths {
            variables: variables.len(),
            coefficients: coefficients.len(),
        });
    }
    Ok(LinearExpr::new(
        variables.iter().copied().zip(coefficients.iter().copied()),
        0.0,
    ))
}
