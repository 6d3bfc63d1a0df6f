use lqp_core::{Problem, Solution, SolverStatus};

use crate::{Solver, SolverConfig};

/// Solver that is never available; every solve ends in [`SolverStatus::Error`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSolver;

impl Solver for NullSolver {
    fn available(&self) -> bool {
        false
    }

    fn solve(&mut self, problem: &Problem, _config: &SolverConfig) -> Solution {
        tracing::debug!(
            component = "solver",
            operation = "solve",
            status = "unavailable",
            solver = "null",
            variables = problem.num_variables(),
            "Null solver cannot solve problems"
        );
        Solution::with_status(SolverStatus::Error)
    }
}
