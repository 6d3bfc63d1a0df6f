//! Read access to the problem tables.

use crate::types::{Constraint, Objective, Variable};
use lqp_expr::{ConstraintId, VariableId};

use super::Problem;
use super::error::ProblemError;

impl Problem {
    /// Get the number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Get a variable by ID.
    pub fn variable(&self, id: VariableId) -> Result<&Variable, ProblemError> {
        self.variables
            .get(id.index())
            .ok_or(ProblemError::UnknownVariable(id))
    }

    /// Get a constraint by ID.
    pub fn constraint(&self, id: ConstraintId) -> Result<&Constraint, ProblemError> {
        self.constraints
            .get(id.index())
            .ok_or(ProblemError::UnknownConstraint(id))
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub(crate) fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub(crate) fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Display name of a variable: its own name, or `v<index>` when empty.
    pub fn variable_name(&self, id: VariableId) -> String {
        match self.variables.get(id.index()) {
            Some(variable) if !variable.name.is_empty() => variable.name.clone(),
            _ => format!("v{}", id.index()),
        }
    }

    /// Name of a constraint, empty when unnamed or unknown.
    pub fn constraint_name(&self, id: ConstraintId) -> &str {
        self.constraints
            .get(id.index())
            .map_or("", |constraint| constraint.name.as_str())
    }

    /// True when no constraint has quadratic terms.
    pub fn is_linear(&self) -> bool {
        self.constraints
            .iter()
            .all(|constraint| constraint.expression.is_linear())
    }
}
