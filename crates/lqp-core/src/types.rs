use lqp_expr::{LinearExpr, QuadraticExpr};
use serde::{Deserialize, Serialize};

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "Minimize",
            Sense::Maximize => "Maximize",
        }
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableCategory {
    Continuous,
    Integer,
    Binary,
}

impl VariableCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableCategory::Continuous => "continuous",
            VariableCategory::Integer => "integer",
            VariableCategory::Binary => "binary",
        }
    }

    /// True for categories that must take integral values.
    pub fn is_integral(self) -> bool {
        matches!(self, VariableCategory::Integer | VariableCategory::Binary)
    }
}

/// Admissible values of a variable or of a constraint expression.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum VariableRange {
    #[default]
    Unbounded,
    LowerBounded(f64),
    UpperBounded(f64),
    Bounded(f64, f64),
    Fixed(f64),
}

impl VariableRange {
    /// `value >= lower`.
    pub fn lower_bound(lower: f64) -> Self {
        VariableRange::LowerBounded(lower)
    }

    /// `value <= upper`.
    pub fn upper_bound(upper: f64) -> Self {
        VariableRange::UpperBounded(upper)
    }

    /// `lower <= value <= upper`.
    pub fn bounds(lower: f64, upper: f64) -> Self {
        VariableRange::Bounded(lower, upper)
    }

    /// `value == fixed`.
    pub fn fixed(value: f64) -> Self {
        VariableRange::Fixed(value)
    }

    /// Range membership test.
    pub fn has_value(&self, value: f64) -> bool {
        match *self {
            VariableRange::Unbounded => true,
            VariableRange::LowerBounded(lower) => lower <= value,
            VariableRange::UpperBounded(upper) => value <= upper,
            VariableRange::Bounded(lower, upper) => lower <= value && value <= upper,
            VariableRange::Fixed(fixed) => value == fixed,
        }
    }

    /// Finite lower bound, or `-inf`.
    pub fn lower(&self) -> f64 {
        match *self {
            VariableRange::LowerBounded(lower) | VariableRange::Bounded(lower, _) => lower,
            VariableRange::Fixed(value) => value,
            VariableRange::Unbounded | VariableRange::UpperBounded(_) => f64::NEG_INFINITY,
        }
    }

    /// Finite upper bound, or `+inf`.
    pub fn upper(&self) -> f64 {
        match *self {
            VariableRange::UpperBounded(upper) | VariableRange::Bounded(_, upper) => upper,
            VariableRange::Fixed(value) => value,
            VariableRange::Unbounded | VariableRange::LowerBounded(_) => f64::INFINITY,
        }
    }

    /// Same range with both bounds moved by `-offset`.
    ///
    /// Used to move an expression's constant to the other side of the range.
    pub fn shifted(&self, offset: f64) -> Self {
        match *self {
            VariableRange::Unbounded => VariableRange::Unbounded,
            VariableRange::LowerBounded(lower) => VariableRange::LowerBounded(lower - offset),
            VariableRange::UpperBounded(upper) => VariableRange::UpperBounded(upper - offset),
            VariableRange::Bounded(lower, upper) => {
                VariableRange::Bounded(lower - offset, upper - offset)
            }
            VariableRange::Fixed(value) => VariableRange::Fixed(value - offset),
        }
    }

    /// False when a bound is NaN or infinite, or a `Bounded` range is empty.
    ///
    /// A missing bound is expressed by the variant, never by `±inf`.
    pub(crate) fn is_well_formed(&self) -> bool {
        match *self {
            VariableRange::Unbounded => true,
            VariableRange::LowerBounded(bound)
            | VariableRange::UpperBounded(bound)
            | VariableRange::Fixed(bound) => bound.is_finite(),
            VariableRange::Bounded(lower, upper) => {
                lower.is_finite() && upper.is_finite() && lower <= upper
            }
        }
    }
}

/// A decision variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub category: VariableCategory,
    pub range: VariableRange,
    pub name: String,
}

/// An expression whose value must lie in `range`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub expression: QuadraticExpr,
    pub range: VariableRange,
    pub name: String,
}

/// Linear objective function.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Objective {
    pub sense: Sense,
    pub expression: LinearExpr,
    pub name: String,
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn has_value_per_range_kind() {
        assert!(VariableRange::Unbounded.has_value(-1e30));
        assert!(VariableRange::lower_bound(0.0).has_value(0.0));
        assert!(!VariableRange::lower_bound(0.0).has_value(-0.5));
        assert!(VariableRange::upper_bound(3.0).has_value(3.0));
        assert!(!VariableRange::upper_bound(3.0).has_value(3.5));
        assert!(VariableRange::bounds(0.0, 2.0).has_value(1.0));
        assert!(!VariableRange::bounds(0.0, 2.0).has_value(3.0));
        assert!(VariableRange::fixed(4.0).has_value(4.0));
        assert!(!VariableRange::fixed(4.0).has_value(4.0001));
    }

    #[test]
    fn lower_and_upper_default_to_infinity() {
        assert_eq!(VariableRange::Unbounded.lower(), f64::NEG_INFINITY);
        assert_eq!(VariableRange::Unbounded.upper(), f64::INFINITY);
        assert_eq!(VariableRange::lower_bound(2.0).lower(), 2.0);
        assert_eq!(VariableRange::lower_bound(2.0).upper(), f64::INFINITY);
        assert_eq!(VariableRange::bounds(-1.0, 1.0).upper(), 1.0);
        assert_eq!(VariableRange::fixed(5.0).lower(), 5.0);
        assert_eq!(VariableRange::fixed(5.0).upper(), 5.0);
    }

    #[test]
    fn shifted_moves_both_bounds() {
        assert_eq!(
            VariableRange::bounds(1.0, 4.0).shifted(1.0),
            VariableRange::bounds(0.0, 3.0)
        );
        assert_eq!(
            VariableRange::upper_bound(0.0).shifted(-7.0),
            VariableRange::upper_bound(7.0)
        );
        assert_eq!(VariableRange::Unbounded.shifted(3.0), VariableRange::Unbounded);
    }

    #[test]
    fn well_formed_ranges() {
        assert!(VariableRange::bounds(1.0, 1.0).is_well_formed());
        assert!(!VariableRange::bounds(2.0, 1.0).is_well_formed());
        assert!(!VariableRange::lower_bound(f64::NAN).is_well_formed());
        assert!(!VariableRange::upper_bound(f64::INFINITY).is_well_formed());
        assert!(!VariableRange::bounds(0.0, f64::INFINITY).is_well_formed());
        assert!(!VariableRange::bounds(f64::NEG_INFINITY, 3.0).is_well_formed());
        assert!(!VariableRange::fixed(f64::NEG_INFINITY).is_well_formed());
        assert!(VariableRange::Unbounded.is_well_formed());
    }

    #[test]
    fn range_serializes_with_variant_tag() {
        let json = serde_json::to_string(&VariableRange::bounds(0.0, 1.0)).unwrap();
        assert_eq!(json, r#"{"Bounded":[0.0,1.0]}"#);
        let back: VariableRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VariableRange::bounds(0.0, 1.0));
    }
}
