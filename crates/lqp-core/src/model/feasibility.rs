//! Feasibility checks and objective evaluation against an assignment.

use crate::types::VariableCategory;
use lqp_expr::{Assignment, VariableId};

use super::Problem;

impl Problem {
    /// Check every variable domain and every constraint range under `assignment`.
    ///
    /// Variables without a value in the assignment read as `0.0`.
    pub fn is_feasible<A: Assignment + ?Sized>(&self, assignment: &A) -> bool {
        for (index, variable) in self.variables.iter().enumerate() {
            let id = VariableId::new(index as u32);
            let value = assignment.value(id);

            let integral = match variable.category {
                VariableCategory::Binary => value == 0.0 || value == 1.0,
                VariableCategory::Integer => value.trunc() == value,
                VariableCategory::Continuous => true,
            };
            if !integral || !variable.range.has_value(value) {
                tracing::debug!(
                    component = "problem",
                    operation = "is_feasible",
                    status = "violated",
                    variable = %self.variable_name(id),
                    category = variable.category.as_str(),
                    value,
                    "Variable domain violated"
                );
                return false;
            }
        }

        for (index, constraint) in self.constraints.iter().enumerate() {
            let value = constraint.expression.evaluate(assignment);
            if !constraint.range.has_value(value) {
                tracing::debug!(
                    component = "problem",
                    operation = "is_feasible",
                    status = "violated",
                    constraint_index = index,
                    constraint = constraint.name.as_str(),
                    value,
                    "Constraint range violated"
                );
                return false;
            }
        }

        true
    }

    /// Value of the objective expression under `assignment`.
    pub fn compute_objective_value<A: Assignment + ?Sized>(&self, assignment: &A) -> f64 {
        self.objective.expression.evaluate(assignment)
    }
}
