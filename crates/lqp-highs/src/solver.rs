//! HiGHS solver implementation.

use crate::ffi::{HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense};
use crate::status::to_solver_status;
use lqp_core::{Problem, ProblemParts, Sense, Solution, SolverStatus, VariableCategory, decompose};
use lqp_expr::VariableId;
use lqp_solver::{Solver, SolverConfig, linear_problem};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// [`Solver`] backed by the HiGHS library.
///
/// Keeps the objective value of its latest solve, so one instance should be
/// used per thread.
#[derive(Debug, Default)]
pub struct HighsSolver {
    objective_value: Option<f64>,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objective value of the latest solve that produced a solution.
    ///
    /// Includes the constant term of the objective expression.
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }
}

impl Solver for HighsSolver {
    fn available(&self) -> bool {
        true
    }

    fn solve(&mut self, problem: &Problem, config: &SolverConfig) -> Solution {
        self.objective_value = None;

        let Some(linear) = linear_problem(problem) else {
            return Solution::with_status(SolverStatus::NotSolved);
        };

        let solver_version = crate::ffi::highs_version().unwrap_or_else(|| "unknown".to_string());
        let solve_started = Instant::now();
        debug!(
            component = "solver",
            operation = "solve",
            status = "started",
            solver = "highs",
            solver_version = %solver_version,
            variables = linear.num_variables(),
            constraints = linear.num_constraints(),
            auxiliary = linear.num_variables() - problem.num_variables(),
            "Starting solve process"
        );

        let parts = decompose(&linear);
        let mut highs_model = HighsModel::new();
        apply_solver_config(&mut highs_model, config);
        add_columns(&parts, &mut highs_model, config.use_mip);
        if let Err(err) = add_rows(&parts, &mut highs_model) {
            warn!(
                component = "solver",
                operation = "add_constraints",
                status = "error",
                error = %err,
                "Failed to build HiGHS rows"
            );
            return Solution::with_status(SolverStatus::Error);
        }

        let highs_status = highs_model.solve();
        write_outputs(&mut highs_model, config);

        let status = to_solver_status(highs_status, highs_model.has_feasible_primal());
        let simplex_iterations = highs_model.simplex_iteration_count();
        let duration_ms = solve_started.elapsed().as_secs_f64() * 1000.0;

        if status != SolverStatus::Optimal {
            warn!(
                component = "solver",
                operation = "solve",
                status = "warn",
                solver = "highs",
                highs_status = highs_status.as_str(),
                solver_status = status.as_str(),
                simplex_iterations,
                duration_ms,
                "HiGHS did not report an optimal solution"
            );
        }

        let mut solution = Solution::with_status(status);
        if !status.has_solution() {
            return solution;
        }

        match highs_model.column_values() {
            Ok(values) => {
                // Auxiliary columns follow the caller's variables and are dropped.
                for (index, value) in values.into_iter().take(problem.num_variables()).enumerate() {
                    solution.set_value(VariableId::new(index as u32), value);
                }
            }
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "extract_solution",
                    status = "error",
                    error = %err,
                    "Solved model has no column values"
                );
                return Solution::with_status(SolverStatus::Error);
            }
        }

        self.objective_value = highs_model
            .objective_value()
            .ok()
            .map(|value| value + parts.objective.expression.constant());

        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            solver = "highs",
            solver_status = status.as_str(),
            objective_value = ?self.objective_value,
            simplex_iterations,
            duration_ms,
            "HiGHS solve completed"
        );

        solution
    }
}

fn apply_solver_config(highs_model: &mut HighsModel, config: &SolverConfig) {
    highs_model.set_quiet(!config.verbose);

    let presolve = if config.presolve { "on" } else { "off" };
    highs_model.set_option("presolve", HighsOption::Str(presolve.to_string()));

    if let Some(limit) = config.timeout_seconds() {
        highs_model.set_option("time_limit", HighsOption::Float(limit));
    }
}

fn add_columns(parts: &ProblemParts, highs_model: &mut HighsModel, use_mip: bool) {
    let sense = match parts.objective.sense {
        Sense::Minimize => ObjectiveSense::Minimize,
        Sense::Maximize => ObjectiveSense::Maximize,
    };
    highs_model.set_objective_sense(sense);

    for (index, variable) in parts.variables.iter().enumerate() {
        let var_id = VariableId::new(index as u32);
        let objective_coeff = parts.objective.expression.linear_coefficient(var_id);
        let is_integer = use_mip && variable.category != VariableCategory::Continuous;
        let lower = variable.range.lower();
        let upper = variable.range.upper();

        highs_model.add_col(lower, upper, objective_coeff, is_integer);

        trace!(
            component = "solver",
            operation = "add_variable",
            status = "success",
            var_id = index,
            lower,
            upper,
            objective_coeff,
            is_integer,
            "Added variable to HiGHS"
        );
    }

    debug!(
        component = "solver",
        operation = "add_variables",
        status = "success",
        num_vars = parts.variables.len(),
        use_mip,
        "Added all variables to HiGHS"
    );
}

fn add_rows(parts: &ProblemParts, highs_model: &mut HighsModel) -> Result<(), HighsModelError> {
    for constraint in &parts.constraints {
        let expression = &constraint.expression;
        let constant = expression.constant();
        let factors: Vec<(usize, f64)> = expression
            .linear_terms()
            .iter()
            .map(|term| (term.variable.index(), term.coefficient))
            .collect();

        let lower = constraint.range.lower() - constant;
        let upper = constraint.range.upper() - constant;
        highs_model.add_row(lower, upper, &factors)?;

        trace!(
            component = "solver",
            operation = "add_constraint",
            status = "success",
            name = constraint.name.as_str(),
            lower,
            upper,
            num_coeffs = factors.len(),
            "Added constraint to HiGHS"
        );
    }

    debug!(
        component = "solver",
        operation = "add_constraints",
        status = "success",
        num_constraints = parts.constraints.len(),
        "Added all constraints to HiGHS"
    );

    Ok(())
}

fn write_outputs(highs_model: &mut HighsModel, config: &SolverConfig) {
    if let Some(path) = config.problem_output.as_deref() {
        if let Err(err) = highs_model.write_model(path) {
            warn!(
                component = "solver",
                operation = "write_model",
                status = "warn",
                error = %err,
                "Problem output not written"
            );
        }
    }
    if let Some(path) = config.solution_output.as_deref() {
        if let Err(err) = highs_model.write_solution(path) {
            warn!(
                component = "solver",
                operation = "write_solution",
                status = "warn",
                error = %err,
                "Solution output not written"
            );
        }
    }
}
