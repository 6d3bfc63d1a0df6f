//! Linear expressions: a constant plus weighted decision variables.

use crate::assignment::Assignment;
use crate::expr::inequality::{ComparisonSense, Inequality};
use crate::expr::quadratic::QuadraticExpr;
use crate::ids::VariableId;
use serde::Serialize;
use std::collections::BTreeMap;

/// A single `coefficient * variable` term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearTerm {
    pub coefficient: f64,
    pub variable: VariableId,
}

/// Degree-1 expression over decision variables.
///
/// Terms are kept normalized: sorted by variable, one entry per variable and
/// no zero coefficients.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinearExpr {
    pub(crate) constant: f64,
    pub(crate) terms: Vec<LinearTerm>,
}

impl LinearExpr {
    // ── Constructors ────────────────────────────────────────

    /// Expression from `(variable, coefficient)` terms and a constant.
    ///
    /// Duplicate variables are merged and zero coefficients dropped.
    pub fn new(terms: impl IntoIterator<Item = (VariableId, f64)>, constant: f64) -> Self {
        let mut expr = Self {
            constant,
            terms: terms
                .into_iter()
                .map(|(variable, coefficient)| LinearTerm {
                    coefficient,
                    variable,
                })
                .collect(),
        };
        expr.normalize();
        expr
    }

    /// The zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Just a constant, no variable terms.
    pub fn from_constant(constant: f64) -> Self {
        Self {
            constant,
            terms: Vec::new(),
        }
    }

    /// Single variable with coefficient 1.0.
    pub fn var(variable: VariableId) -> Self {
        Self::term(variable, 1.0)
    }

    /// Single linear term: coeff * var.
    pub fn term(variable: VariableId, coefficient: f64) -> Self {
        if coefficient == 0.0 {
            return Self::default();
        }
        Self {
            constant: 0.0,
            terms: vec![LinearTerm {
                coefficient,
                variable,
            }],
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn linear_terms(&self) -> &[LinearTerm] {
        &self.terms
    }

    /// Coefficient of `variable`, `0.0` when absent.
    pub fn linear_coefficient(&self, variable: VariableId) -> f64 {
        self.terms
            .binary_search_by_key(&variable, |term| term.variable)
            .map_or(0.0, |idx| self.terms[idx].coefficient)
    }

    /// True when the expression has no variable terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// True for the exact zero expression.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty() && self.constant == 0.0
    }

    /// Max degree of any term (0 = constant only).
    pub fn degree(&self) -> usize {
        usize::from(!self.terms.is_empty())
    }

    /// Variables referenced by the expression, in ascending order.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.terms.iter().map(|term| term.variable)
    }

    // ── Operations ──────────────────────────────────────────

    /// Sum of two expressions. `e.add(&e)` is `e.scale(2.0)`.
    pub fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.add_in_place(other);
        result
    }

    /// Difference of two expressions. `e.subtract(&e)` is the zero expression.
    pub fn subtract(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.subtract_in_place(other);
        result
    }

    /// Scale all terms and the constant by a factor.
    pub fn scale(&self, factor: f64) -> Self {
        let mut result = self.clone();
        result.scale_in_place(factor);
        result
    }

    /// Divide all terms and the constant by a divisor.
    pub fn divide(&self, divisor: f64) -> Self {
        let mut result = self.clone();
        result.divide_in_place(divisor);
        result
    }

    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Add a constant offset.
    pub fn add_constant(&self, value: f64) -> Self {
        Self {
            constant: self.constant + value,
            terms: self.terms.clone(),
        }
    }

    /// Copy with constant set to zero.
    pub fn without_constant(&self) -> Self {
        Self {
            constant: 0.0,
            terms: self.terms.clone(),
        }
    }

    /// Value of the expression under `assignment`.
    pub fn evaluate<A: Assignment + ?Sized>(&self, assignment: &A) -> f64 {
        self.terms.iter().fold(self.constant, |value, term| {
            value + term.coefficient * assignment.value(term.variable)
        })
    }

    // ── Comparisons (produce Inequality) ────────────────────

    pub fn le_expr(&self, rhs: impl Into<QuadraticExpr>) -> Inequality {
        Inequality::new(self.clone(), ComparisonSense::LessEqual, rhs)
    }

    pub fn ge_expr(&self, rhs: impl Into<QuadraticExpr>) -> Inequality {
        Inequality::new(self.clone(), ComparisonSense::GreaterEqual, rhs)
    }

    pub fn eq_expr(&self, rhs: impl Into<QuadraticExpr>) -> Inequality {
        Inequality::new(self.clone(), ComparisonSense::Equal, rhs)
    }

    // ── In-place primitives ─────────────────────────────────

    pub(crate) fn add_in_place(&mut self, other: &Self) {
        if *self == *other {
            self.scale_in_place(2.0);
            return;
        }
        self.merge(other, 1.0);
    }

    pub(crate) fn subtract_in_place(&mut self, other: &Self) {
        if *self == *other {
            self.clear();
            return;
        }
        self.merge(other, -1.0);
    }

    pub(crate) fn scale_in_place(&mut self, factor: f64) {
        if factor == 0.0 {
            self.clear();
            return;
        }
        self.constant *= factor;
        for term in &mut self.terms {
            term.coefficient *= factor;
        }
        self.normalize();
    }

    pub(crate) fn divide_in_place(&mut self, divisor: f64) {
        self.constant /= divisor;
        for term in &mut self.terms {
            term.coefficient /= divisor;
        }
        self.normalize();
    }

    pub(crate) fn clear(&mut self) {
        self.constant = 0.0;
        self.terms.clear();
    }

    pub(crate) fn merge(&mut self, other: &Self, sign: f64) {
        self.constant += sign * other.constant;
        self.terms.extend(other.terms.iter().map(|term| LinearTerm {
            coefficient: sign * term.coefficient,
            variable: term.variable,
        }));
        self.normalize();
    }

    /// Merge duplicate variables, drop zero coefficients, sort by variable.
    pub(crate) fn normalize(&mut self) {
        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for term in self.terms.drain(..) {
            *merged.entry(term.variable).or_insert(0.0) += term.coefficient;
        }
        self.terms = merged
            .into_iter()
            .filter(|(_, coefficient)| *coefficient != 0.0)
            .map(|(variable, coefficient)| LinearTerm {
                coefficient,
                variable,
            })
            .collect();
    }
}

impl From<f64> for LinearExpr {
    fn from(constant: f64) -> Self {
        Self::from_constant(constant)
    }
}

impl From<VariableId> for LinearExpr {
    fn from(variable: VariableId) -> Self {
        Self::var(variable)
    }
}

impl From<(f64, VariableId)> for LinearExpr {
    fn from((coefficient, variable): (f64, VariableId)) -> Self {
        Self::term(variable, coefficient)
    }
}

impl From<LinearTerm> for LinearExpr {
    fn from(term: LinearTerm) -> Self {
        Self::term(term.variable, term.coefficient)
    }
}
