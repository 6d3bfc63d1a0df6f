//! Status conversion from HiGHS to lqp.

use crate::ffi::HighsStatus;
use lqp_core::SolverStatus;

/// Map a HiGHS outcome onto the lqp status set.
///
/// A limit counts as `Feasible` only when HiGHS holds a feasible primal
/// point.
pub(crate) fn to_solver_status(status: HighsStatus, feasible_primal: bool) -> SolverStatus {
    match status {
        HighsStatus::Optimal => SolverStatus::Optimal,
        HighsStatus::Infeasible => SolverStatus::NoFeasibleSolution,
        HighsStatus::Unbounded => SolverStatus::UnboundedSolution,
        HighsStatus::ReachedTimeLimit | HighsStatus::ReachedIterationLimit => {
            if feasible_primal {
                SolverStatus::Feasible
            } else {
                SolverStatus::Undefined
            }
        }
        HighsStatus::Error => SolverStatus::Error,
        HighsStatus::Unknown => SolverStatus::Undefined,
    }
}
