//! Expression types for optimization modeling.
//!
//! - `linear`: LinearExpr: constant + weighted variables
//! - `quadratic`: QuadraticExpr: LinearExpr part + weighted variable pairs
//! - `inequality`: Inequality: normalized `lhs - rhs` with a comparison sense
//! - `ops`: operator overloads between ids, scalars and expressions
//! - `builders`: sum helpers
//! - `error`: expression errors

pub mod builders;
pub mod error;
pub mod inequality;
pub mod linear;
mod ops;
pub mod quadratic;

pub use builders::{linear_sum, weighted_sum};
pub use error::ExprError;
pub use inequality::{ComparisonSense, Inequality};
pub use linear::{LinearExpr, LinearTerm};
pub use quadratic::{QuadraticExpr, QuadraticTerm, VariablePair};
