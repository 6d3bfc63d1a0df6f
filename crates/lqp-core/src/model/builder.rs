//! Problem builder methods for adding variables, constraints, and objectives.

use crate::types::{Constraint, Objective, Sense, Variable, VariableCategory, VariableRange};
use lqp_expr::{ComparisonSense, ConstraintId, Inequality, LinearExpr, QuadraticExpr, VariableId};

use crate::model::Problem;
use crate::model::error::ProblemError;

impl Problem {
    /// Add a variable to the problem.
    ///
    /// Without an explicit range, binary variables get `Bounded(0, 1)` and
    /// every other category is unbounded.
    pub fn add_variable(
        &mut self,
        category: VariableCategory,
        range: Option<VariableRange>,
        name: impl Into<String>,
    ) -> Result<VariableId, ProblemError> {
        let range = range.unwrap_or(match category {
            VariableCategory::Binary => VariableRange::Bounded(0.0, 1.0),
            VariableCategory::Continuous | VariableCategory::Integer => VariableRange::Unbounded,
        });
        if !range.is_well_formed() {
            return Err(ProblemError::InvalidRange(range));
        }

        let id = self.push_variable(Variable {
            category,
            range,
            name: name.into(),
        });
        tracing::trace!(
            component = "problem",
            operation = "add_variable",
            status = "success",
            variable_id = id.inner(),
            category = category.as_str(),
            "Added variable"
        );
        Ok(id)
    }

    /// Add a continuous variable.
    pub fn add_continuous(
        &mut self,
        range: VariableRange,
        name: impl Into<String>,
    ) -> Result<VariableId, ProblemError> {
        self.add_variable(VariableCategory::Continuous, Some(range), name)
    }

    /// Add an integer variable.
    pub fn add_integer(
        &mut self,
        range: VariableRange,
        name: impl Into<String>,
    ) -> Result<VariableId, ProblemError> {
        self.add_variable(VariableCategory::Integer, Some(range), name)
    }

    /// Add a binary variable with range `Bounded(0, 1)`.
    pub fn add_binary(&mut self, name: impl Into<String>) -> Result<VariableId, ProblemError> {
        self.add_variable(VariableCategory::Binary, None, name)
    }

    /// Add a constraint from an inequality (e.g. `(x + y).le_expr(10.0)`).
    ///
    /// The stored expression is `lhs - rhs`, constrained against zero.
    pub fn add_constraint(
        &mut self,
        inequality: Inequality,
        name: impl Into<String>,
    ) -> Result<ConstraintId, ProblemError> {
        let (expression, sense) = inequality.into_parts();
        let range = match sense {
            ComparisonSense::GreaterEqual => VariableRange::LowerBounded(0.0),
            ComparisonSense::Equal => VariableRange::Fixed(0.0),
            ComparisonSense::LessEqual => VariableRange::UpperBounded(0.0),
        };
        self.add_ranged_constraint(expression, range, name)
    }

    /// Add a constraint with an explicit range on the expression value.
    pub fn add_ranged_constraint(
        &mut self,
        expression: impl Into<QuadraticExpr>,
        range: VariableRange,
        name: impl Into<String>,
    ) -> Result<ConstraintId, ProblemError> {
        let expression = expression.into();
        if !range.is_well_formed() {
            return Err(ProblemError::InvalidRange(range));
        }
        self.validate_expression(&expression)?;

        let degree = expression.degree();
        let id = self.push_constraint(Constraint {
            expression,
            range,
            name: name.into(),
        });
        tracing::trace!(
            component = "problem",
            operation = "add_constraint",
            status = "success",
            constraint_id = id.inner(),
            degree,
            "Added constraint"
        );
        Ok(id)
    }

    /// Set the objective function, replacing any previous one.
    pub fn set_objective(
        &mut self,
        sense: Sense,
        expression: impl Into<LinearExpr>,
        name: impl Into<String>,
    ) -> Result<(), ProblemError> {
        let expression = expression.into();
        self.validate_expression(&QuadraticExpr::from(&expression))?;

        self.objective = Objective {
            sense,
            expression,
            name: name.into(),
        };
        tracing::debug!(
            component = "problem",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            terms = self.objective.expression.linear_terms().len(),
            "Set objective function"
        );
        Ok(())
    }

    pub(crate) fn push_variable(&mut self, variable: Variable) -> VariableId {
        let id = VariableId::new(self.variables.len() as u32);
        self.variables.push(variable);
        id
    }

    pub(crate) fn push_constraint(&mut self, constraint: Constraint) -> ConstraintId {
        let id = ConstraintId::new(self.constraints.len() as u32);
        self.constraints.push(constraint);
        id
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn new_problem_minimizes_zero() {
        let problem = Problem::new();
        assert_eq!(problem.num_variables(), 0);
        assert_eq!(problem.num_constraints(), 0);
        assert_eq!(problem.objective().sense, Sense::Minimize);
        assert!(problem.objective().expression.is_zero());
        assert!(problem.objective().name.is_empty());
    }

    #[test]
    fn ids_are_dense_and_ordered() {
        let mut problem = Problem::new();
        let a = problem
            .add_continuous(VariableRange::Unbounded, "a")
            .unwrap();
        let b = problem.add_binary("b").unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }

    #[test]
    fn binary_defaults_to_unit_range() {
        let mut problem = Problem::new();
        let b = problem
            .add_variable(VariableCategory::Binary, None, "")
            .unwrap();
        let x = problem
            .add_variable(VariableCategory::Continuous, None, "x")
            .unwrap();
        let n = problem
            .add_variable(VariableCategory::Integer, None, "n")
            .unwrap();
        assert_eq!(problem.variable(b).unwrap().range, VariableRange::bounds(0.0, 1.0));
        assert_eq!(problem.variable(x).unwrap().range, VariableRange::Unbounded);
        assert_eq!(problem.variable(n).unwrap().range, VariableRange::Unbounded);
    }

    #[test]
    fn explicit_binary_range_is_kept() {
        let mut problem = Problem::new();
        let b = problem
            .add_variable(VariableCategory::Binary, Some(VariableRange::fixed(1.0)), "on")
            .unwrap();
        assert_eq!(problem.variable(b).unwrap().range, VariableRange::fixed(1.0));
    }

    #[test]
    fn rejects_malformed_ranges() {
        let mut problem = Problem::new();
        let result = problem.add_continuous(VariableRange::bounds(5.0, 1.0), "x");
        assert_eq!(
            result,
            Err(ProblemError::InvalidRange(VariableRange::bounds(5.0, 1.0)))
        );
        assert!(
            problem
                .add_continuous(VariableRange::lower_bound(f64::NAN), "y")
                .is_err()
        );
        assert_eq!(problem.num_variables(), 0);
    }

    #[test]
    fn rejects_infinite_bounds() {
        let mut problem = Problem::new();
        let result = problem.add_continuous(VariableRange::bounds(0.0, f64::INFINITY), "x");
        assert!(matches!(result, Err(ProblemError::InvalidRange(_))));

        let x = problem
            .add_continuous(VariableRange::lower_bound(0.0), "x")
            .unwrap();
        let result = problem.add_ranged_constraint(
            x,
            VariableRange::bounds(f64::NEG_INFINITY, 3.0),
            "cap",
        );
        assert_eq!(result.unwrap_err().code(), "RANGE_INVALID");
        assert_eq!(problem.num_constraints(), 0);
    }

    #[test]
    fn add_constraint_maps_sense_to_range() {
        let mut problem = Problem::new();
        let x = problem
            .add_continuous(VariableRange::lower_bound(0.0), "x")
            .unwrap();

        let ge = problem
            .add_constraint(LinearExpr::var(x).ge_expr(1.0), "ge")
            .unwrap();
        let eq = problem
            .add_constraint(LinearExpr::var(x).eq_expr(2.0), "eq")
            .unwrap();
        let le = problem
            .add_constraint(LinearExpr::var(x).le_expr(3.0), "le")
            .unwrap();

        assert_eq!(problem.constraint(ge).unwrap().range, VariableRange::lower_bound(0.0));
        assert_eq!(problem.constraint(eq).unwrap().range, VariableRange::fixed(0.0));
        assert_eq!(problem.constraint(le).unwrap().range, VariableRange::upper_bound(0.0));
        assert_eq!(problem.constraint(le).unwrap().expression.constant(), -3.0);
        assert_eq!(le.index(), 2);
    }

    #[test]
    fn add_constraint_rejects_foreign_variables() {
        let mut problem = Problem::new();
        let foreign = VariableId::new(9);
        let result = problem.add_constraint(LinearExpr::var(foreign).le_expr(1.0), "c");
        assert_eq!(result, Err(ProblemError::UnknownVariable(foreign)));
        assert_eq!(problem.num_constraints(), 0);
    }

    #[test]
    fn add_constraint_rejects_non_finite_coefficients() {
        let mut problem = Problem::new();
        let x = problem.add_continuous(VariableRange::Unbounded, "x").unwrap();
        let result = problem.add_ranged_constraint(
            LinearExpr::term(x, f64::INFINITY),
            VariableRange::upper_bound(1.0),
            "c",
        );
        assert!(matches!(
            result,
            Err(ProblemError::NonFiniteCoefficient { .. })
        ));
    }

    #[test]
    fn ranged_constraint_keeps_range() {
        let mut problem = Problem::new();
        let x = problem.add_continuous(VariableRange::Unbounded, "x").unwrap();
        let c = problem
            .add_ranged_constraint(LinearExpr::var(x), VariableRange::bounds(-1.0, 1.0), "box")
            .unwrap();
        assert_eq!(problem.constraint(c).unwrap().range, VariableRange::bounds(-1.0, 1.0));
        assert_eq!(problem.constraint_name(c), "box");
    }

    #[test]
    fn set_objective_replaces_previous() {
        let mut problem = Problem::new();
        let x = problem.add_continuous(VariableRange::Unbounded, "x").unwrap();
        problem
            .set_objective(Sense::Minimize, LinearExpr::term(x, 1.0), "cost")
            .unwrap();
        problem
            .set_objective(Sense::Maximize, LinearExpr::term(x, 2.0), "")
            .unwrap();
        assert_eq!(problem.objective().sense, Sense::Maximize);
        assert_eq!(problem.objective().expression.linear_coefficient(x), 2.0);
        assert!(problem.objective().name.is_empty());
    }

    #[test]
    fn set_objective_rejects_unknown_variables() {
        let mut problem = Problem::new();
        let result = problem.set_objective(Sense::Minimize, VariableId::new(0), "z");
        assert_eq!(result, Err(ProblemError::UnknownVariable(VariableId::new(0))));
    }
}
