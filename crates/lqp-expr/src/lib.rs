//! Expression algebra for linear and quadratic optimization models.
//!
//! Expressions are plain values: every operation returns (or leaves behind)
//! a normalized expression with one entry per variable or variable pair and
//! no zero coefficients.

pub mod assignment;
pub mod expr;
pub mod ids;

pub use assignment::Assignment;
pub use expr::{
    ComparisonSense, ExprError, Inequality, LinearExpr, LinearTerm, QuadraticExpr, QuadraticTerm,
    VariablePair, linear_sum, weighted_sum,
};
pub use ids::{ConstraintId, VariableId};
