//! Problem module for building optimization problems.
//!
//! This module provides the core [`Problem`] type: an append-only table of
//! variables, an append-only table of constraints and a single linear
//! objective.
//!
//! # Module Organization
//!
//! - [`error`]: Problem error types
//! - [`builder`]: Methods for adding variables, constraints, and objectives
//! - [`storage`]: Read access to variables, constraints and names
//! - [`feasibility`]: Assignment checks and objective evaluation
//! - [`linearize`]: Quadratic-to-linear reformulation
//! - [`pretty`]: Human-readable text dump
//! - [`inspect`]: Serializable snapshots

mod builder;
mod error;
mod feasibility;
mod inspect;
mod linearize;
mod pretty;
mod storage;

use crate::types::{Constraint, Objective, Variable};
use lqp_expr::{QuadraticExpr, VariableId};

pub use error::ProblemError;
pub use inspect::{ConstraintView, ObjectiveView, ProblemSnapshot, SnapshotMetadata, VariableView};
pub use pretty::format_number;

/// A linear or quadratic optimization problem.
///
/// Variables and constraints are appended and never removed, so a
/// [`VariableId`] stays valid for this problem and for every problem derived
/// from it by [`Problem::linearize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Problem {
    pub(crate) variables: Vec<Variable>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Objective,
}

impl Problem {
    /// Create a new empty problem (`Minimize 0`).
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ProblemError> {
        if id.index() < self.variables.len() {
            Ok(())
        } else {
            Err(ProblemError::UnknownVariable(id))
        }
    }

    /// Every variable known and every coefficient finite.
    pub(crate) fn validate_expression(&self, expr: &QuadraticExpr) -> Result<(), ProblemError> {
        for variable in expr.variables() {
            self.ensure_variable_exists(variable)?;
        }

        let coefficients = std::iter::once(expr.constant())
            .chain(expr.linear_terms().iter().map(|term| term.coefficient))
            .chain(expr.quadratic_terms().iter().map(|term| term.coefficient));
        for coefficient in coefficients {
            if !coefficient.is_finite() {
                return Err(ProblemError::NonFiniteCoefficient { coefficient });
            }
        }
        Ok(())
    }
}
