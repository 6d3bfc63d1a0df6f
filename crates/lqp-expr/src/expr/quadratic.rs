//! Quadratic expressions: a linear part plus weighted variable products.

use crate::assignment::Assignment;
use crate::expr::error::ExprError;
use crate::expr::inequality::{ComparisonSense, Inequality};
use crate::expr::linear::{LinearExpr, LinearTerm};
use crate::ids::VariableId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Unordered pair of variables, stored with the lower index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariablePair {
    first: VariableId,
    second: VariableId,
}

impl VariablePair {
    /// Canonical pair: `new(a, b) == new(b, a)`.
    pub fn new(a: VariableId, b: VariableId) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(self) -> VariableId {
        self.first
    }

    pub fn second(self) -> VariableId {
        self.second
    }

    /// True when both sides are the same variable.
    pub fn is_square(self) -> bool {
        self.first == self.second
    }

    pub fn contains(self, variable: VariableId) -> bool {
        self.first == variable || self.second == variable
    }
}

/// A single `coefficient * a * b` term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadraticTerm {
    pub coefficient: f64,
    pub variables: VariablePair,
}

/// Degree-2 expression over decision variables.
///
/// Both the linear and the quadratic part are normalized after every merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuadraticExpr {
    linear: LinearExpr,
    quadratic: Vec<QuadraticTerm>,
}

impl QuadraticExpr {
    // ── Constructors ────────────────────────────────────────

    /// The zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_constant(constant: f64) -> Self {
        LinearExpr::from_constant(constant).into()
    }

    pub fn var(variable: VariableId) -> Self {
        LinearExpr::var(variable).into()
    }

    /// The product `a * b` with coefficient 1.0.
    pub fn pair(a: VariableId, b: VariableId) -> Self {
        Self::quadratic_term(a, b, 1.0)
    }

    /// The product `coefficient * a * b`.
    pub fn quadratic_term(a: VariableId, b: VariableId, coefficient: f64) -> Self {
        if coefficient == 0.0 {
            return Self::default();
        }
        Self {
            linear: LinearExpr::default(),
            quadratic: vec![QuadraticTerm {
                coefficient,
                variables: VariablePair::new(a, b),
            }],
        }
    }

    /// Fully distributed product of two linear expressions.
    pub fn product(lhs: &LinearExpr, rhs: &LinearExpr) -> Self {
        let mut linear = Vec::with_capacity(lhs.terms.len() + rhs.terms.len());

        if lhs.constant != 0.0 {
            linear.extend(
                rhs.terms
                    .iter()
                    .map(|term| (term.variable, lhs.constant * term.coefficient)),
            );
        }

        if rhs.constant != 0.0 {
            linear.extend(
                lhs.terms
                    .iter()
                    .map(|term| (term.variable, rhs.constant * term.coefficient)),
            );
        }

        let mut quadratic = Vec::with_capacity(lhs.terms.len() * rhs.terms.len());
        for left in &lhs.terms {
            for right in &rhs.terms {
                quadratic.push(QuadraticTerm {
                    coefficient: left.coefficient * right.coefficient,
                    variables: VariablePair::new(left.variable, right.variable),
                });
            }
        }

        let mut expr = Self {
            linear: LinearExpr::new(linear, lhs.constant * rhs.constant),
            quadratic,
        };
        expr.normalize_quadratic();
        expr
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.linear.constant
    }

    pub fn linear_terms(&self) -> &[LinearTerm] {
        &self.linear.terms
    }

    pub fn quadratic_terms(&self) -> &[QuadraticTerm] {
        &self.quadratic
    }

    /// Constant and linear terms as a linear expression.
    pub fn linear_part(&self) -> &LinearExpr {
        &self.linear
    }

    pub fn linear_coefficient(&self, variable: VariableId) -> f64 {
        self.linear.linear_coefficient(variable)
    }

    /// Coefficient of `a * b` (in either order), `0.0` when absent.
    pub fn quadratic_coefficient(&self, a: VariableId, b: VariableId) -> f64 {
        let key = VariablePair::new(a, b);
        self.quadratic
            .binary_search_by_key(&key, |term| term.variables)
            .map_or(0.0, |idx| self.quadratic[idx].coefficient)
    }

    /// True when there are no terms at all.
    pub fn is_constant(&self) -> bool {
        self.linear.is_constant() && self.quadratic.is_empty()
    }

    /// True when there are no quadratic terms.
    pub fn is_linear(&self) -> bool {
        self.quadratic.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.linear.is_zero() && self.quadratic.is_empty()
    }

    /// Max degree of any term (0 = constant only).
    pub fn degree(&self) -> usize {
        if self.quadratic.is_empty() {
            self.linear.degree()
        } else {
            2
        }
    }

    /// Every variable referenced by a linear or quadratic term.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.linear.variables().chain(
            self.quadratic
                .iter()
                .flat_map(|term| [term.variables.first, term.variables.second]),
        )
    }

    // ── Operations ──────────────────────────────────────────

    pub fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.add_in_place(other);
        result
    }

    pub fn subtract(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.subtract_in_place(other);
        result
    }

    pub fn scale(&self, factor: f64) -> Self {
        let mut result = self.clone();
        result.scale_in_place(factor);
        result
    }

    pub fn divide(&self, divisor: f64) -> Self {
        let mut result = self.clone();
        result.divide_in_place(divisor);
        result
    }

    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Value of the expression under `assignment`.
    pub fn evaluate<A: Assignment + ?Sized>(&self, assignment: &A) -> f64 {
        self.quadratic
            .iter()
            .fold(self.linear.evaluate(assignment), |value, term| {
                value
                    + term.coefficient
                        * assignment.value(term.variables.first)
                        * assignment.value(term.variables.second)
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
            self.linear.clear();
            self.quadratic.clear();
            return;
        }
        self.merge(other, -1.0);
    }

    pub(crate) fn scale_in_place(&mut self, factor: f64) {
        if factor == 0.0 {
            self.linear.clear();
            self.quadratic.clear();
            return;
        }
        self.linear.scale_in_place(factor);
        for term in &mut self.quadratic {
            term.coefficient *= factor;
        }
        self.normalize_quadratic();
    }

    pub(crate) fn divide_in_place(&mut self, divisor: f64) {
        self.linear.divide_in_place(divisor);
        for term in &mut self.quadratic {
            term.coefficient /= divisor;
        }
        self.normalize_quadratic();
    }

    fn merge(&mut self, other: &Self, sign: f64) {
        self.linear.merge(&other.linear, sign);
        self.quadratic
            .extend(other.quadratic.iter().map(|term| QuadraticTerm {
                coefficient: sign * term.coefficient,
                variables: term.variables,
            }));
        self.normalize_quadratic();
    }

    /// Merge duplicate pairs, drop zero coefficients, sort by pair.
    fn normalize_quadratic(&mut self) {
        let mut merged: BTreeMap<VariablePair, f64> = BTreeMap::new();
        for term in self.quadratic.drain(..) {
            *merged.entry(term.variables).or_insert(0.0) += term.coefficient;
        }
        self.quadratic = merged
            .into_iter()
            .filter(|(_, coefficient)| *coefficient != 0.0)
            .map(|(variables, coefficient)| QuadraticTerm {
                coefficient,
                variables,
            })
            .collect();
    }

    #[cfg(test)]
    pub(crate) fn normalized(mut self) -> Self {
        self.linear.normalize();
        self.normalize_quadratic();
        self
    }
}

impl From<LinearExpr> for QuadraticExpr {
    fn from(linear: LinearExpr) -> Self {
        Self {
            linear,
            quadratic: Vec::new(),
        }
    }
}

impl From<&LinearExpr> for QuadraticExpr {
    fn from(linear: &LinearExpr) -> Self {
        linear.clone().into()
    }
}

impl From<f64> for QuadraticExpr {
    fn from(constant: f64) -> Self {
        Self::from_constant(constant)
    }
}

impl From<VariableId> for QuadraticExpr {
    fn from(variable: VariableId) -> Self {
        Self::var(variable)
    }
}

impl From<VariablePair> for QuadraticExpr {
    fn from(pair: VariablePair) -> Self {
        Self::pair(pair.first, pair.second)
    }
}

impl TryFrom<QuadraticExpr> for LinearExpr {
    type Error = ExprError;

    fn try_from(expr: QuadraticExpr) -> Result<Self, Self::Error> {
        if expr.quadratic.is_empty() {
            Ok(expr.linear)
        } else {
            Err(ExprError::NotLinear {
                quadratic_terms: expr.quadratic.len(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn x() -> VariableId {
        VariableId::new(1)
    }

    fn y() -> VariableId {
        VariableId::new(2)
    }

    #[test]
    fn pair_is_canonical() {
        assert_eq!(VariablePair::new(y(), x()), VariablePair::new(x(), y()));
        assert_eq!(VariablePair::new(y(), x()).first(), x());
        assert_eq!(QuadraticExpr::pair(y(), x()), QuadraticExpr::pair(x(), y()));
        assert!(VariablePair::new(x(), x()).is_square());
    }

    #[test]
    fn product_distributes_fully() {
        // (2 + 3x) * (1 + 4y)
        let p = LinearExpr::new(vec![(x(), 3.0)], 2.0);
        let q = LinearExpr::new(vec![(y(), 4.0)], 1.0);
        let product = QuadraticExpr::product(&p, &q);

        assert_eq!(product.constant(), 2.0);
        assert_eq!(product.linear_coefficient(x()), 3.0);
        assert_eq!(product.linear_coefficient(y()), 8.0);
        assert_eq!(product.linear_terms().len(), 2);
        assert_eq!(product.quadratic_coefficient(x(), y()), 12.0);
        assert_eq!(product.quadratic_coefficient(y(), x()), 12.0);
        assert_eq!(product.quadratic_terms().len(), 1);
    }

    #[test]
    fn product_merges_cross_terms_and_squares() {
        // (x + y) * (x + y) = x^2 + 2xy + y^2
        let s = LinearExpr::new(vec![(x(), 1.0), (y(), 1.0)], 0.0);
        let square = QuadraticExpr::product(&s, &s);
        assert_eq!(square.quadratic_coefficient(x(), x()), 1.0);
        assert_eq!(square.quadratic_coefficient(x(), y()), 2.0);
        assert_eq!(square.quadratic_coefficient(y(), y()), 1.0);
        assert_eq!(square.quadratic_terms().len(), 3);
        assert!(square.linear_terms().is_empty());
    }

    #[test]
    fn product_with_zero_constant_skips_linear_part() {
        let p = LinearExpr::var(x());
        let q = LinearExpr::new(vec![(y(), 2.0)], 0.0);
        let product = QuadraticExpr::product(&p, &q);
        assert!(product.linear_terms().is_empty());
        assert_eq!(product.constant(), 0.0);
        assert_eq!(product.degree(), 2);
    }

    #[test]
    fn linear_and_constant_predicates() {
        assert!(QuadraticExpr::from_constant(4.0).is_constant());
        assert!(QuadraticExpr::var(x()).is_linear());
        assert!(!QuadraticExpr::var(x()).is_constant());
        assert!(!QuadraticExpr::pair(x(), y()).is_linear());
    }

    #[test]
    fn add_to_itself_doubles_every_part() {
        let e = QuadraticExpr::pair(x(), y())
            .add(&QuadraticExpr::var(x()))
            .add(&QuadraticExpr::from_constant(1.5));
        let doubled = e.add(&e);
        assert_eq!(doubled.constant(), 3.0);
        assert_eq!(doubled.linear_coefficient(x()), 2.0);
        assert_eq!(doubled.quadratic_coefficient(x(), y()), 2.0);
    }

    #[test]
    fn subtract_from_itself_is_zero() {
        let e = QuadraticExpr::quadratic_term(x(), y(), 0.1)
            .add(&QuadraticExpr::from(LinearExpr::new(vec![(x(), 0.2)], 0.3)));
        let zero = e.subtract(&e);
        assert!(zero.is_zero());
        assert_eq!(zero, QuadraticExpr::zero());
    }

    #[test]
    fn scale_by_zero_clears() {
        let e = QuadraticExpr::pair(x(), y()).add(&QuadraticExpr::from_constant(2.0));
        assert_eq!(e.scale(0.0), QuadraticExpr::zero());
    }

    #[test]
    fn opposite_products_cancel() {
        let e = QuadraticExpr::pair(x(), y()).subtract(&QuadraticExpr::pair(y(), x()));
        assert!(e.is_linear());
        assert!(e.is_zero());
    }

    #[test]
    fn normalization_is_idempotent() {
        let e = QuadraticExpr::product(
            &LinearExpr::new(vec![(x(), 1.0), (y(), -2.0)], 3.0),
            &LinearExpr::new(vec![(y(), 5.0)], -1.0),
        );
        assert_eq!(e.clone().normalized(), e);
    }

    #[test]
    fn evaluate_sums_all_parts() {
        // 1 + 2x + 3xy at x = 2, y = 5
        let e = QuadraticExpr::from(LinearExpr::new(vec![(x(), 2.0)], 1.0))
            .add(&QuadraticExpr::quadratic_term(x(), y(), 3.0));
        let values = vec![0.0, 2.0, 5.0];
        assert_eq!(e.evaluate(&values), 35.0);
    }

    #[test]
    fn try_into_linear() {
        let linear = LinearExpr::try_from(QuadraticExpr::var(x())).unwrap();
        assert_eq!(linear, LinearExpr::var(x()));

        let err = LinearExpr::try_from(QuadraticExpr::pair(x(), y())).unwrap_err();
        assert_eq!(err, ExprError::NotLinear { quadratic_terms: 1 });
    }
}
