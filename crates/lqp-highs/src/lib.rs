//! HiGHS adapter for lqp problems.
//!
//! [`HighsSolver`] implements [`lqp_solver::Solver`]: quadratic problems are
//! linearized first, then handed to HiGHS row by row.

pub mod ffi;
pub mod solver;
mod status;

pub use ffi::{HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense, highs_version};
pub use solver::HighsSolver;
