#![allow(clippy::float_cmp)]

use super::support::{assignment, row_value};
use crate::model::Problem;
use crate::types::{Sense, Variable, VariableCategory, VariableRange};
use lqp_expr::{LinearExpr, VariableId};

#[test]
fn binary_product_gets_binary_auxiliary() {
    let mut problem = Problem::new();
    let b1 = problem.add_binary("b1").unwrap();
    let b2 = problem.add_binary("b2").unwrap();
    problem.add_constraint((b1 * b2).le_expr(1.0), "c").unwrap();

    let linear = problem.linearize().unwrap();
    assert!(linear.is_linear());
    assert_eq!(linear.num_variables(), 3);
    assert_eq!(linear.num_constraints(), 3);

    let y = VariableId::new(2);
    assert_eq!(linear.variable(y).unwrap().category, VariableCategory::Binary);
    assert_eq!(linear.variable_name(y), "v2");

    let rewritten = &linear.constraints()[2];
    assert_eq!(rewritten.name, "c");
    assert_eq!(rewritten.range, VariableRange::upper_bound(0.0));
    assert_eq!(rewritten.expression.linear_coefficient(y), 1.0);
    assert_eq!(rewritten.expression.constant(), -1.0);
    assert_eq!(rewritten.expression.linear_terms().len(), 1);
}

#[test]
fn binary_auxiliary_equals_product_on_all_assignments() {
    let mut problem = Problem::new();
    let b1 = problem.add_binary("b1").unwrap();
    let b2 = problem.add_binary("b2").unwrap();
    problem.add_constraint((b1 * b2).le_expr(1.0), "c").unwrap();
    let linear = problem.linearize().unwrap();
    let y = VariableId::new(2);

    for v1 in [0.0, 1.0] {
        for v2 in [0.0, 1.0] {
            for vy in [0.0, 1.0] {
                let values = assignment(&[(b1, v1), (b2, v2), (y, vy)]);
                assert_eq!(
                    linear.is_feasible(&values),
                    vy == v1 * v2,
                    "b1={v1} b2={v2} y={vy}"
                );
            }
        }
    }
}

#[test]
fn mixed_product_gets_bounded_auxiliary() {
    let mut problem = Problem::new();
    let b = problem.add_binary("b").unwrap();
    let x = problem
        .add_continuous(VariableRange::bounds(0.0, 10.0), "x")
        .unwrap();
    problem
        .add_constraint((2.0 * (b * x)).le_expr(15.0), "c")
        .unwrap();

    let linear = problem.linearize().unwrap();
    assert!(linear.is_linear());
    assert_eq!(linear.num_variables(), 3);
    assert_eq!(linear.num_constraints(), 4);

    let z = VariableId::new(2);
    let aux = linear.variable(z).unwrap();
    assert_eq!(aux.category, VariableCategory::Continuous);
    assert_eq!(aux.range, VariableRange::bounds(0.0, 10.0));

    let rewritten = &linear.constraints()[3];
    assert_eq!(rewritten.name, "c");
    assert_eq!(rewritten.expression.linear_coefficient(z), 2.0);
    assert_eq!(rewritten.expression.constant(), -15.0);

    // envelope rows evaluated at b = 1, x = 4, z = 4 are all tight or slack
    let values = assignment(&[(b, 1.0), (x, 4.0), (z, 4.0)]);
    assert_eq!(row_value(&linear, 0, &values), -6.0);
    assert_eq!(row_value(&linear, 1, &values), 0.0);
    assert_eq!(row_value(&linear, 2, &values), 0.0);
}

#[test]
fn mixed_auxiliary_follows_binary_factor() {
    let mut problem = Problem::new();
    let b = problem.add_binary("b").unwrap();
    let x = problem
        .add_continuous(VariableRange::bounds(0.0, 10.0), "x")
        .unwrap();
    problem
        .add_constraint((2.0 * (b * x)).le_expr(15.0), "c")
        .unwrap();
    let linear = problem.linearize().unwrap();
    let z = VariableId::new(2);

    // b = 0 forces z = 0
    assert!(linear.is_feasible(&assignment(&[(b, 0.0), (x, 7.0), (z, 0.0)])));
    assert!(!linear.is_feasible(&assignment(&[(b, 0.0), (x, 7.0), (z, 3.0)])));

    // b = 1 forces z = x
    assert!(linear.is_feasible(&assignment(&[(b, 1.0), (x, 7.0), (z, 7.0)])));
    assert!(!linear.is_feasible(&assignment(&[(b, 1.0), (x, 7.0), (z, 6.0)])));
    assert!(!linear.is_feasible(&assignment(&[(b, 1.0), (x, 7.0), (z, 8.0)])));

    // and the rewritten row still binds: 2 * 8 > 15
    assert!(!linear.is_feasible(&assignment(&[(b, 1.0), (x, 8.0), (z, 8.0)])));
}

#[test]
fn mixed_product_accepts_continuous_first() {
    let mut problem = Problem::new();
    let x = problem
        .add_continuous(VariableRange::bounds(0.0, 5.0), "x")
        .unwrap();
    let b = problem.add_binary("b").unwrap();
    problem.add_constraint((x * b).ge_expr(1.0), "c").unwrap();

    let linear = problem.linearize().unwrap();
    let z = VariableId::new(2);
    assert_eq!(linear.variable(z).unwrap().range, VariableRange::bounds(0.0, 5.0));
    assert!(linear.is_feasible(&assignment(&[(b, 1.0), (x, 2.0), (z, 2.0)])));
    assert!(!linear.is_feasible(&assignment(&[(b, 0.0), (x, 2.0), (z, 0.0)])));
}

#[test]
fn repeated_products_share_one_auxiliary() {
    let mut problem = Problem::new();
    let b1 = problem.add_binary("b1").unwrap();
    let b2 = problem.add_binary("b2").unwrap();
    problem.add_constraint((b1 * b2).le_expr(1.0), "first").unwrap();
    problem
        .add_constraint((b2 * b1 + b1).ge_expr(0.0), "second")
        .unwrap();

    let linear = problem.linearize().unwrap();
    assert_eq!(linear.num_variables(), 3);
    // two envelope rows plus the two rewritten constraints
    assert_eq!(linear.num_constraints(), 4);
    assert_eq!(linear.constraints()[2].name, "first");
    assert_eq!(linear.constraints()[3].name, "second");
    assert_eq!(
        linear.constraints()[3]
            .expression
            .linear_coefficient(VariableId::new(2)),
        1.0
    );
    assert_eq!(linear.constraints()[3].expression.linear_coefficient(b1), 1.0);
}

#[test]
fn linear_constraints_keep_their_position() {
    let mut problem = Problem::new();
    let b1 = problem.add_binary("b1").unwrap();
    let b2 = problem.add_binary("b2").unwrap();
    problem
        .add_constraint((LinearExpr::var(b1) + b2).le_expr(2.0), "sum")
        .unwrap();
    problem.add_constraint((b1 * b2).eq_expr(0.0), "excl").unwrap();
    problem
        .set_objective(Sense::Maximize, LinearExpr::var(b1) + b2, "z")
        .unwrap();

    let linear = problem.linearize().unwrap();
    assert_eq!(linear.constraints()[0], problem.constraints()[0]);
    assert_eq!(linear.constraints()[3].name, "excl");
    assert_eq!(linear.constraints()[3].range, VariableRange::fixed(0.0));
    assert_eq!(linear.objective(), problem.objective());
    assert_eq!(&linear.variables()[..2], problem.variables());
}

#[test]
fn continuous_factor_needs_zero_lower_bound() {
    let mut problem = Problem::new();
    let b = problem.add_binary("b").unwrap();
    let x = problem
        .add_continuous(VariableRange::lower_bound(0.0), "x")
        .unwrap();
    problem.add_constraint((b * x).le_expr(1.0), "c").unwrap();
    assert!(problem.linearize().is_none());

    let mut shifted = Problem::new();
    let b = shifted.add_binary("b").unwrap();
    let x = shifted
        .add_continuous(VariableRange::bounds(1.0, 4.0), "x")
        .unwrap();
    shifted.add_constraint((b * x).le_expr(1.0), "c").unwrap();
    assert!(shifted.linearize().is_none());
}

#[test]
fn continuous_factor_needs_finite_upper_bound() {
    let mut problem = Problem::new();
    let b = problem.add_binary("b").unwrap();
    // The builder rejects this range; push it directly to reach the linearizer.
    let x = problem.push_variable(Variable {
        category: VariableCategory::Continuous,
        range: VariableRange::Bounded(0.0, f64::INFINITY),
        name: "x".to_string(),
    });
    problem.add_constraint((b * x).le_expr(100.0), "c").unwrap();

    assert!(problem.is_feasible(&assignment(&[(b, 1.0), (x, 50.0)])));
    assert!(problem.linearize().is_none());
}

#[test]
fn binary_integer_product_is_rejected() {
    let mut problem = Problem::new();
    let b = problem.add_binary("b").unwrap();
    let n = problem
        .add_integer(VariableRange::bounds(0.0, 4.0), "n")
        .unwrap();
    problem.add_constraint((b * n).le_expr(2.0), "c").unwrap();
    assert!(problem.linearize().is_none());
}
