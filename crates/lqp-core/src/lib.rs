//! Problem model for linear and quadratic optimization.
//!
//! A [`Problem`] owns variables, constraints over linear or quadratic
//! expressions and a linear objective. Problems can check assignments,
//! evaluate their objective, rewrite supported products into linear form and
//! render themselves as text or JSON.

pub mod adapter;
pub mod logging;
pub mod model;
pub mod solution;
pub mod types;

pub use adapter::{ProblemParts, decompose};
pub use logging::{LogFormat, LoggingError, enable_logging};
pub use model::{
    ConstraintView, ObjectiveView, Problem, ProblemError, ProblemSnapshot, SnapshotMetadata,
    VariableView, format_number,
};
pub use solution::{Solution, SolverStatus};
pub use types::{Constraint, Objective, Sense, Variable, VariableCategory, VariableRange};
