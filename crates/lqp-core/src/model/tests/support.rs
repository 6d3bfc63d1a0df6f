use crate::model::Problem;
use lqp_expr::VariableId;
use std::collections::BTreeMap;

/// Sparse assignment from `(variable, value)` pairs.
pub(super) fn assignment(values: &[(VariableId, f64)]) -> BTreeMap<VariableId, f64> {
    values.iter().copied().collect()
}

/// Value of constraint `index` under `values`.
pub(super) fn row_value(problem: &Problem, index: usize, values: &BTreeMap<VariableId, f64>) -> f64 {
    problem.constraints()[index].expression.evaluate(values)
}
