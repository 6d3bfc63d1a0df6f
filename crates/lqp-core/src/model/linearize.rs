//! Quadratic-to-linear reformulation.
//!
//! Products of two binaries and products of a binary with a bounded
//! non-negative continuous variable are replaced by an auxiliary variable
//! tied to its factors by linear envelope constraints. Any other product
//! makes the whole reformulation fail.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::types::{Constraint, Variable, VariableCategory, VariableRange};
use lqp_expr::{LinearExpr, VariableId, VariablePair};

use super::Problem;

/// Auxiliary variable already created for each product in one `linearize` call.
type AuxiliaryMap = BTreeMap<VariablePair, VariableId>;

impl Problem {
    /// Linear problem equivalent to this one, or `None` when some product
    /// cannot be reformulated.
    ///
    /// Original variables keep their IDs; auxiliary variables and their
    /// envelope constraints are appended.
    pub fn linearize(&self) -> Option<Problem> {
        if self.is_linear() {
            tracing::trace!(
                component = "problem",
                operation = "linearize",
                status = "skipped",
                "Problem already linear"
            );
            return Some(self.clone());
        }

        let started = Instant::now();
        let mut result = Problem {
            variables: self.variables.clone(),
            constraints: Vec::with_capacity(self.constraints.len()),
            objective: self.objective.clone(),
        };
        let mut auxiliaries = AuxiliaryMap::new();

        for constraint in &self.constraints {
            if constraint.expression.is_linear() {
                result.constraints.push(constraint.clone());
                continue;
            }

            let mut accumulator = constraint.expression.linear_part().clone();
            for term in constraint.expression.quadratic_terms() {
                let auxiliary = self.product_variable(term.variables, &mut result, &mut auxiliaries)?;
                accumulator += LinearExpr::term(auxiliary, term.coefficient);
            }

            result.push_constraint(Constraint {
                expression: accumulator.into(),
                range: constraint.range,
                name: constraint.name.clone(),
            });
        }

        tracing::debug!(
            component = "problem",
            operation = "linearize",
            status = "success",
            auxiliary_variables = auxiliaries.len(),
            constraints_in = self.num_constraints(),
            constraints_out = result.num_constraints(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Linearized quadratic constraints"
        );
        Some(result)
    }

    /// Auxiliary variable standing for the product `pair`, created on first use.
    fn product_variable(
        &self,
        pair: VariablePair,
        result: &mut Problem,
        auxiliaries: &mut AuxiliaryMap,
    ) -> Option<VariableId> {
        if let Some(&auxiliary) = auxiliaries.get(&pair) {
            return Some(auxiliary);
        }

        let (first, second) = (pair.first(), pair.second());
        let first_var = self.variable(first).ok()?;
        let second_var = self.variable(second).ok()?;

        let auxiliary = match (first_var.category, second_var.category) {
            (VariableCategory::Binary, VariableCategory::Binary) => {
                binary_product(result, first, second)
            }
            (VariableCategory::Binary, VariableCategory::Continuous) => {
                self.mixed_product(result, first, second, second_var)?
            }
            (VariableCategory::Continuous, VariableCategory::Binary) => {
                self.mixed_product(result, second, first, first_var)?
            }
            (first_category, second_category) => {
                tracing::debug!(
                    component = "problem",
                    operation = "linearize",
                    status = "unsupported",
                    first = %self.variable_name(first),
                    second = %self.variable_name(second),
                    first_category = first_category.as_str(),
                    second_category = second_category.as_str(),
                    "Product cannot be linearized"
                );
                return None;
            }
        };

        auxiliaries.insert(pair, auxiliary);
        tracing::trace!(
            component = "problem",
            operation = "linearize",
            status = "auxiliary",
            first = first.inner(),
            second = second.inner(),
            auxiliary = auxiliary.inner(),
            "Created product variable"
        );
        Some(auxiliary)
    }

    /// `z = binary * continuous` for `continuous` in `[0, U]`.
    fn mixed_product(
        &self,
        result: &mut Problem,
        binary: VariableId,
        continuous: VariableId,
        continuous_var: &Variable,
    ) -> Option<VariableId> {
        let upper = match continuous_var.range {
            VariableRange::Bounded(lower, upper) if lower == 0.0 && upper.is_finite() => upper,
            range => {
                tracing::debug!(
                    component = "problem",
                    operation = "linearize",
                    status = "unsupported",
                    binary = %self.variable_name(binary),
                    continuous = %self.variable_name(continuous),
                    range = ?range,
                    "Continuous factor must be bounded in [0, U] with finite U"
                );
                return None;
            }
        };

        let z = result.push_variable(Variable {
            category: VariableCategory::Continuous,
            range: VariableRange::Bounded(0.0, upper),
            name: String::new(),
        });
        // z <= U * binary
        push_envelope(
            result,
            LinearExpr::from(z) - upper * binary,
            VariableRange::UpperBounded(0.0),
        );
        // z <= continuous
        push_envelope(
            result,
            LinearExpr::from(z) - continuous,
            VariableRange::UpperBounded(0.0),
        );
        // z >= continuous - (1 - binary) * U
        push_envelope(
            result,
            LinearExpr::from(z) - continuous - upper * binary + upper,
            VariableRange::LowerBounded(0.0),
        );
        Some(z)
    }
}

/// `y = a * b` for binaries `a`, `b` (possibly the same variable).
fn binary_product(result: &mut Problem, a: VariableId, b: VariableId) -> VariableId {
    let y = result.push_variable(Variable {
        category: VariableCategory::Binary,
        range: VariableRange::Bounded(0.0, 1.0),
        name: String::new(),
    });
    // y >= a + b - 1
    push_envelope(
        result,
        LinearExpr::from(y) - a - b + 1.0,
        VariableRange::LowerBounded(0.0),
    );
    // y <= (a + b) / 2
    push_envelope(
        result,
        LinearExpr::from(y) - 0.5 * a - 0.5 * b,
        VariableRange::UpperBounded(0.0),
    );
    y
}

fn push_envelope(result: &mut Problem, expression: LinearExpr, range: VariableRange) {
    result.push_constraint(Constraint {
        expression: expression.into(),
        range,
        name: String::new(),
    });
}
