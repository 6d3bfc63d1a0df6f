//! Read-only view of a problem for solver adapters.

use crate::model::Problem;
use crate::types::{Constraint, Objective, Variable};

/// Owned copies of the three problem tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemParts {
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub objective: Objective,
}

/// Split `problem` into its variable, constraint and objective tables.
///
/// Position `i` of `variables` belongs to `VariableId::new(i)`.
pub fn decompose(problem: &Problem) -> ProblemParts {
    ProblemParts {
        variables: problem.variables().to_vec(),
        constraints: problem.constraints().to_vec(),
        objective: problem.objective().clone(),
    }
}
