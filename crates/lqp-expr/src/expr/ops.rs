//! Operator overloads between scalars, variables and expressions.
//!
//! Results keep the lowest degree that can hold them: sums and scalar
//! multiples of variables are `LinearExpr`, products of two linear operands
//! are `QuadraticExpr`.

use crate::expr::linear::LinearExpr;
use crate::expr::quadratic::QuadraticExpr;
use crate::ids::VariableId;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// `lhs + rhs` and `lhs - rhs`, both sides converted into `$target`.
macro_rules! impl_additive {
    ($target:ty => $(($lhs:ty, $rhs:ty)),* $(,)?) => {
        $(
            impl Add<$rhs> for $lhs {
                type Output = $target;

                fn add(self, rhs: $rhs) -> $target {
                    let mut result: $target = self.into();
                    let rhs: $target = rhs.into();
                    result.add_in_place(&rhs);
                    result
                }
            }

            impl Sub<$rhs> for $lhs {
                type Output = $target;

                fn sub(self, rhs: $rhs) -> $target {
                    let mut result: $target = self.into();
                    let rhs: $target = rhs.into();
                    result.subtract_in_place(&rhs);
                    result
                }
            }
        )*
    };
}

/// `x * f64`, `f64 * x`, `x / f64` and `-x`.
macro_rules! impl_scalar {
    ($(($operand:ty => $target:ty)),* $(,)?) => {
        $(
            impl Mul<f64> for $operand {
                type Output = $target;

                fn mul(self, factor: f64) -> $target {
                    let mut result: $target = self.into();
                    result.scale_in_place(factor);
                    result
                }
            }

            impl Mul<$operand> for f64 {
                type Output = $target;

                fn mul(self, operand: $operand) -> $target {
                    operand * self
                }
            }

            impl Div<f64> for $operand {
                type Output = $target;

                fn div(self, divisor: f64) -> $target {
                    let mut result: $target = self.into();
                    result.divide_in_place(divisor);
                    result
                }
            }

            impl Neg for $operand {
                type Output = $target;

                fn neg(self) -> $target {
                    self * -1.0
                }
            }
        )*
    };
}

/// Product of two linear operands.
macro_rules! impl_product {
    ($(($lhs:ty, $rhs:ty)),* $(,)?) => {
        $(
            impl Mul<$rhs> for $lhs {
                type Output = QuadraticExpr;

                fn mul(self, rhs: $rhs) -> QuadraticExpr {
                    let lhs: LinearExpr = self.into();
                    let rhs: LinearExpr = rhs.into();
                    QuadraticExpr::product(&lhs, &rhs)
                }
            }
        )*
    };
}

/// `+=`, `-=` from every operand convertible into `$target`, plus `*=`/`/=` by scalars.
macro_rules! impl_assign {
    ($target:ty => $($rhs:ty),* $(,)?) => {
        $(
            impl AddAssign<$rhs> for $target {
                fn add_assign(&mut self, rhs: $rhs) {
                    let rhs: $target = rhs.into();
                    self.add_in_place(&rhs);
                }
            }

            impl SubAssign<$rhs> for $target {
                fn sub_assign(&mut self, rhs: $rhs) {
                    let rhs: $target = rhs.into();
                    self.subtract_in_place(&rhs);
                }
            }
        )*

        impl AddAssign<&$target> for $target {
            fn add_assign(&mut self, rhs: &$target) {
                self.add_in_place(rhs);
            }
        }

        impl SubAssign<&$target> for $target {
            fn sub_assign(&mut self, rhs: &$target) {
                self.subtract_in_place(rhs);
            }
        }

        impl MulAssign<f64> for $target {
            fn mul_assign(&mut self, factor: f64) {
                self.scale_in_place(factor);
            }
        }

        impl DivAssign<f64> for $target {
            fn div_assign(&mut self, divisor: f64) {
                self.divide_in_place(divisor);
            }
        }
    };
}

/// Borrowed `&a + &b` and `&a - &b` for expression types.
macro_rules! impl_borrowed_additive {
    ($($target:ty),* $(,)?) => {
        $(
            impl Add<&$target> for &$target {
                type Output = $target;

                fn add(self, rhs: &$target) -> $target {
                    let mut result = self.clone();
                    result.add_in_place(rhs);
                    result
                }
            }

            impl Sub<&$target> for &$target {
                type Output = $target;

                fn sub(self, rhs: &$target) -> $target {
                    let mut result = self.clone();
                    result.subtract_in_place(rhs);
                    result
                }
            }

            impl Neg for &$target {
                type Output = $target;

                fn neg(self) -> $target {
                    let mut result = self.clone();
                    result.scale_in_place(-1.0);
                    result
                }
            }
        )*
    };
}

impl_additive!(LinearExpr =>
    (VariableId, VariableId),
    (VariableId, f64),
    (f64, VariableId),
    (VariableId, LinearExpr),
    (f64, LinearExpr),
    (LinearExpr, LinearExpr),
    (LinearExpr, VariableId),
    (LinearExpr, f64),
);

impl_additive!(QuadraticExpr =>
    (QuadraticExpr, QuadraticExpr),
    (QuadraticExpr, LinearExpr),
    (QuadraticExpr, VariableId),
    (QuadraticExpr, f64),
    (LinearExpr, QuadraticExpr),
    (VariableId, QuadraticExpr),
    (f64, QuadraticExpr),
);

impl_scalar!(
    (VariableId => LinearExpr),
    (LinearExpr => LinearExpr),
    (QuadraticExpr => QuadraticExpr),
);

impl_product!(
    (VariableId, VariableId),
    (VariableId, LinearExpr),
    (LinearExpr, VariableId),
    (LinearExpr, LinearExpr),
);

impl_assign!(LinearExpr => LinearExpr, VariableId, f64);
impl_assign!(QuadraticExpr => QuadraticExpr, LinearExpr, VariableId, f64);

impl_borrowed_additive!(LinearExpr, QuadraticExpr);

impl Mul<&LinearExpr> for &LinearExpr {
    type Output = QuadraticExpr;

    fn mul(self, rhs: &LinearExpr) -> QuadraticExpr {
        QuadraticExpr::product(self, rhs)
    }
}
