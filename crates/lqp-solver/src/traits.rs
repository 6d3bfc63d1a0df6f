//! Solver trait for abstraction over different solver backends.

use std::borrow::Cow;

use lqp_core::{Problem, Solution};

use crate::SolverConfig;

/// Trait for solver implementations.
///
/// Adapters report every outcome through the returned [`Solution`]: failures
/// show up as a status such as `Error` or `NotSolved`, never as a panic.
pub trait Solver {
    /// Whether the backend can be used in this build/environment.
    fn available(&self) -> bool;

    /// Solve `problem` with the given configuration.
    ///
    /// Values are reported for the variables of `problem` only.
    fn solve(&mut self, problem: &Problem, config: &SolverConfig) -> Solution;
}

/// Linear form of `problem` for adapters that only accept linear rows.
///
/// Borrows when `problem` is already linear, owns the linearization
/// otherwise, and returns `None` when linearization fails.
pub fn linear_problem(problem: &Problem) -> Option<Cow<'_, Problem>> {
    if problem.is_linear() {
        return Some(Cow::Borrowed(problem));
    }

    match problem.linearize() {
        Some(linear) => Some(Cow::Owned(linear)),
        None => {
            tracing::warn!(
                component = "solver",
                operation = "linearize",
                status = "failed",
                constraints = problem.num_constraints(),
                "Problem could not be linearized"
            );
            None
        }
    }
}
