//! Solver-agnostic solve results.
//!
//! Every adapter reports its outcome as a [`Solution`]: a [`SolverStatus`]
//! plus the values it found for the caller's variables.

use lqp_expr::{Assignment, VariableId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SolverStatus {
    /// Proven optimal solution.
    Optimal,
    /// Feasible solution without proof of optimality (e.g. limit reached).
    Feasible,
    /// Problem proven infeasible.
    Infeasible,
    /// Solver stopped without finding any feasible point.
    NoFeasibleSolution,
    /// Objective unbounded in the optimization direction.
    UnboundedSolution,
    /// Solver finished in a state that maps to none of the above.
    Undefined,
    /// Problem was never handed to the solver (e.g. it could not be linearized).
    #[default]
    NotSolved,
    /// Solver unavailable or failed.
    Error,
}

impl SolverStatus {
    /// True when the solution carries usable variable values.
    pub fn has_solution(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Feasible => "feasible",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::NoFeasibleSolution => "no_feasible_solution",
            SolverStatus::UnboundedSolution => "unbounded_solution",
            SolverStatus::Undefined => "undefined",
            SolverStatus::NotSolved => "not_solved",
            SolverStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status and variable values reported by a solver.
///
/// Variables without a recorded value read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub status: SolverStatus,
    values: BTreeMap<VariableId, f64>,
}

impl Solution {
    /// Empty solution with the given status.
    pub fn with_status(status: SolverStatus) -> Self {
        Self {
            status,
            values: BTreeMap::new(),
        }
    }

    pub fn set_value(&mut self, variable: VariableId, value: f64) {
        self.values.insert(variable, value);
    }

    /// Recorded value of `variable`, `0.0` when absent.
    pub fn value(&self, variable: VariableId) -> f64 {
        self.values.get(&variable).copied().unwrap_or(0.0)
    }

    /// True when no value has been recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop all recorded values; the status is kept.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn values(&self) -> &BTreeMap<VariableId, f64> {
        &self.values
    }

    pub fn has_solution(&self) -> bool {
        self.status.has_solution()
    }
}

impl Assignment for Solution {
    fn value(&self, variable: VariableId) -> f64 {
        Solution::value(self, variable)
    }
}
