//! Problem inspection and snapshot methods.

use serde::{Deserialize, Serialize};

use crate::model::Problem;
use crate::types::{Sense, VariableCategory, VariableRange};
use lqp_expr::{ConstraintId, VariableId};

/// View of a variable in a problem snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableView {
    pub id: VariableId,
    pub name: String,
    pub category: VariableCategory,
    pub range: VariableRange,
}

/// View of a constraint in a problem snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintView {
    pub id: ConstraintId,
    pub name: String,
    pub range: VariableRange,
    pub constant: f64,
    pub linear: Vec<(VariableId, f64)>,
    pub quadratic: Vec<(VariableId, VariableId, f64)>,
}

/// View of the objective in a problem snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub sense: Sense,
    pub name: String,
    pub constant: f64,
    pub terms: Vec<(VariableId, f64)>,
}

/// Counts describing a problem snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub variables: usize,
    pub constraints: usize,
    pub quadratic_constraints: usize,
    pub is_linear: bool,
}

/// A complete snapshot of a problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSnapshot {
    pub variables: Vec<VariableView>,
    pub constraints: Vec<ConstraintView>,
    pub objective: ObjectiveView,
    pub metadata: SnapshotMetadata,
}

impl Problem {
    /// Structured copy of the problem tables, with display names resolved.
    pub fn snapshot(&self) -> ProblemSnapshot {
        let variables = self
            .variables
            .iter()
            .enumerate()
            .map(|(index, variable)| {
                let id = VariableId::new(index as u32);
                VariableView {
                    id,
                    name: self.variable_name(id),
                    category: variable.category,
                    range: variable.range,
                }
            })
            .collect();

        let constraints: Vec<ConstraintView> = self
            .constraints
            .iter()
            .enumerate()
            .map(|(index, constraint)| ConstraintView {
                id: ConstraintId::new(index as u32),
                name: constraint.name.clone(),
                range: constraint.range,
                constant: constraint.expression.constant(),
                linear: constraint
                    .expression
                    .linear_terms()
                    .iter()
                    .map(|term| (term.variable, term.coefficient))
                    .collect(),
                quadratic: constraint
                    .expression
                    .quadratic_terms()
                    .iter()
                    .map(|term| {
                        (
                            term.variables.first(),
                            term.variables.second(),
                            term.coefficient,
                        )
                    })
                    .collect(),
            })
            .collect();

        let quadratic_constraints = constraints
            .iter()
            .filter(|view| !view.quadratic.is_empty())
            .count();

        let objective = ObjectiveView {
            sense: self.objective.sense,
            name: self.objective.name.clone(),
            constant: self.objective.expression.constant(),
            terms: self
                .objective
                .expression
                .linear_terms()
                .iter()
                .map(|term| (term.variable, term.coefficient))
                .collect(),
        };

        ProblemSnapshot {
            variables,
            constraints,
            objective,
            metadata: SnapshotMetadata {
                variables: self.num_variables(),
                constraints: self.num_constraints(),
                quadratic_constraints,
                is_linear: quadratic_constraints == 0,
            },
        }
    }

    /// Snapshot rendered as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}
