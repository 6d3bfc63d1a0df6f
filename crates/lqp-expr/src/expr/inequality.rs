//! Inequalities: an expression normalized to `lhs - rhs` with a comparison sense.

use crate::expr::quadratic::QuadraticExpr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "le",
            ComparisonSense::GreaterEqual => "ge",
            ComparisonSense::Equal => "eq",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "<=",
            ComparisonSense::GreaterEqual => ">=",
            ComparisonSense::Equal => "==",
        }
    }
}

/// `expression <sense> 0`, where `expression` is `lhs - rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Inequality {
    expression: QuadraticExpr,
    sense: ComparisonSense,
}

impl Inequality {
    pub fn new(
        lhs: impl Into<QuadraticExpr>,
        sense: ComparisonSense,
        rhs: impl Into<QuadraticExpr>,
    ) -> Self {
        let mut expression = lhs.into();
        expression.subtract_in_place(&rhs.into());
        Self { expression, sense }
    }

    pub fn expression(&self) -> &QuadraticExpr {
        &self.expression
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn into_parts(self) -> (QuadraticExpr, ComparisonSense) {
        (self.expression, self.sense)
    }
}
