//! Thin wrapper around the HiGHS library.
//!
//! This module contains unsafe code for interacting with the C library.
#![allow(unsafe_code)]

use highs::{Col, HighsModelStatus, RowProblem, Sense as HighsSense, SolvedModel};
use std::ffi::{CStr, CString};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// HiGHS `primal_solution_status` value for a feasible primal point.
const PRIMAL_SOLUTION_FEASIBLE: highs_sys::HighsInt = 2;

/// Objective sense for optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Model status reported by HiGHS after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighsStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Time limit reached; a feasible point may be available.
    ReachedTimeLimit,
    /// Iteration limit reached; a feasible point may be available.
    ReachedIterationLimit,
    /// HiGHS rejected the model or failed while solving it.
    Error,
    Unknown,
}

impl HighsStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HighsStatus::Optimal => "optimal",
            HighsStatus::Infeasible => "infeasible",
            HighsStatus::Unbounded => "unbounded",
            HighsStatus::ReachedTimeLimit => "time_limit",
            HighsStatus::ReachedIterationLimit => "iteration_limit",
            HighsStatus::Error => "error",
            HighsStatus::Unknown => "unknown",
        }
    }

    /// Whether the solve stopped early on a limit.
    pub fn is_limit(self) -> bool {
        matches!(
            self,
            HighsStatus::ReachedTimeLimit | HighsStatus::ReachedIterationLimit
        )
    }
}

/// Errors returned by the HiGHS model wrapper.
#[derive(Debug, Clone)]
pub enum HighsModelError {
    ColumnIndexOutOfBounds {
        column_index: usize,
        num_columns: usize,
    },
    SolveRequired {
        operation: &'static str,
    },
    InvalidPath(PathBuf),
    WriteFailed {
        operation: &'static str,
        path: PathBuf,
        status_code: i32,
    },
}

impl fmt::Display for HighsModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsModelError::ColumnIndexOutOfBounds {
                column_index,
                num_columns,
            } => write!(
                f,
                "column index {} out of bounds (num_columns = {})",
                column_index, num_columns
            ),
            HighsModelError::SolveRequired { operation } => {
                write!(f, "solve must be called before {}", operation)
            }
            HighsModelError::InvalidPath(path) => {
                write!(f, "path {} cannot be passed to HiGHS", path.display())
            }
            HighsModelError::WriteFailed {
                operation,
                path,
                status_code,
            } => write!(
                f,
                "{} to {} failed with HiGHS status {}",
                operation,
                path.display(),
                status_code
            ),
        }
    }
}

impl std::error::Error for HighsModelError {}

/// Option value types for HiGHS solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsOption {
    Float(f64),
    Str(String),
}

/// Safe wrapper around a HiGHS model.
///
/// Columns and rows are staged in a [`RowProblem`]; [`HighsModel::solve`]
/// hands them to HiGHS and keeps the solved model for value extraction and
/// file output.
pub struct HighsModel {
    problem: RowProblem,
    objective_sense: ObjectiveSense,
    columns: Vec<Col>,
    options: Vec<(String, HighsOption)>,
    quiet: bool,
    solved: Option<SolvedModel>,
}

impl HighsModel {
    pub fn new() -> Self {
        debug!(
            component = "solver",
            operation = "init_highs",
            status = "success",
            "Creating new HiGHS model"
        );
        HighsModel {
            problem: RowProblem::default(),
            objective_sense: ObjectiveSense::Minimize,
            columns: Vec::new(),
            options: Vec::new(),
            quiet: false,
            solved: None,
        }
    }

    /// Add a column and return its index.
    ///
    /// Integer columns are only integral when `is_integer` is set; bounds
    /// may be infinite.
    pub fn add_col(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        objective_coefficient: f64,
        is_integer: bool,
    ) -> usize {
        trace!(
            lower_bound,
            upper_bound,
            objective_coefficient,
            is_integer,
            component = "solver",
            operation = "add_column",
            status = "success",
            "Adding column"
        );
        self.solved = None;
        let col = if is_integer {
            self.problem
                .add_integer_column(objective_coefficient, lower_bound..=upper_bound)
        } else {
            self.problem
                .add_column(objective_coefficient, lower_bound..=upper_bound)
        };
        self.columns.push(col);
        self.columns.len() - 1
    }

    /// Add a row `lower_bound <= sum(coefficient * column) <= upper_bound`.
    ///
    /// # Errors
    ///
    /// Returns an error if any column index is out of bounds.
    pub fn add_row(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        factors: &[(usize, f64)],
    ) -> Result<usize, HighsModelError> {
        trace!(
            lower_bound,
            upper_bound,
            num_factors = factors.len(),
            component = "solver",
            operation = "add_row",
            status = "success",
            "Adding row"
        );
        self.solved = None;
        let num_columns = self.columns.len();
        let mut row = Vec::with_capacity(factors.len());
        for &(col_idx, coeff) in factors {
            let col = *self.columns.get(col_idx).ok_or_else(|| {
                warn!(
                    component = "solver",
                    operation = "add_row",
                    status = "error",
                    col_idx,
                    num_columns,
                    "Column index out of bounds for constraint"
                );
                HighsModelError::ColumnIndexOutOfBounds {
                    column_index: col_idx,
                    num_columns,
                }
            })?;
            row.push((col, coeff));
        }
        self.problem.add_row(lower_bound..=upper_bound, row);
        Ok(self.problem.num_rows().saturating_sub(1))
    }

    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        self.objective_sense = sense;
    }

    /// Set a HiGHS option for the next solve.
    pub fn set_option(&mut self, option: impl Into<String>, value: HighsOption) {
        self.options.push((option.into(), value));
    }

    /// Suppress all HiGHS output for the next solve.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> usize {
        self.problem.num_rows()
    }

    /// Solve the staged model.
    ///
    /// The staged columns and rows are consumed; a new solve needs a rebuilt
    /// model.
    pub fn solve(&mut self) -> HighsStatus {
        debug!(
            num_cols = self.problem.num_cols(),
            num_rows = self.problem.num_rows(),
            ?self.objective_sense,
            component = "solver",
            operation = "solve",
            status = "started",
            "Solving model"
        );

        let sense = match self.objective_sense {
            ObjectiveSense::Minimize => HighsSense::Minimise,
            ObjectiveSense::Maximize => HighsSense::Maximise,
        };

        let problem = std::mem::take(&mut self.problem);
        self.columns.clear();
        let mut model = problem.optimise(sense);
        if self.quiet {
            model.make_quiet();
        }
        for (option, value) in self.options.drain(..) {
            match value {
                HighsOption::Float(val) => model.set_option(option.as_str(), val),
                HighsOption::Str(val) => model.set_option(option.as_str(), val.as_str()),
            }
        }

        match model.try_solve() {
            Ok(solved) => {
                let status = map_status(solved.status());
                trace!(
                    component = "solver",
                    operation = "solve",
                    status = "success",
                    solver_status = status.as_str(),
                    "Solution status received"
                );
                self.solved = Some(solved);
                status
            }
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "solve",
                    status = "error",
                    ?err,
                    "HiGHS failed to solve the model"
                );
                self.solved = None;
                HighsStatus::Error
            }
        }
    }

    /// Objective value of the latest solve.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn objective_value(&self) -> Result<f64, HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "objective_value",
        })?;
        Ok(solved.objective_value())
    }

    /// Primal column values of the latest solve.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn column_values(&self) -> Result<Vec<f64>, HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "column_values",
        })?;
        Ok(solved.get_solution().columns().to_vec())
    }

    /// Whether HiGHS holds a feasible primal point for the latest solve.
    pub fn has_feasible_primal(&self) -> bool {
        self.get_int_info("primal_solution_status") == Some(PRIMAL_SOLUTION_FEASIBLE)
    }

    /// Simplex iterations of the latest solve, 0 when unavailable.
    pub fn simplex_iteration_count(&self) -> u64 {
        match self.get_int_info("simplex_iteration_count") {
            Some(value) if value >= 0 => value as u64,
            _ => 0,
        }
    }

    fn get_int_info(&self, name: &str) -> Option<highs_sys::HighsInt> {
        let solved = self.solved.as_ref()?;
        let c_name = CString::new(name).ok()?;
        let mut value: highs_sys::HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntInfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
        };
        if status == highs_sys::STATUS_OK {
            Some(value)
        } else {
            debug!(
                component = "solver",
                operation = "solve_info",
                info = name,
                status_code = status,
                "HiGHS info value not available"
            );
            None
        }
    }

    /// Write the solved model in the format implied by the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved, the path is not
    /// representable as a C string, or HiGHS reports a write failure.
    pub fn write_model(&mut self, path: &Path) -> Result<(), HighsModelError> {
        let solved = self.solved.as_mut().ok_or(HighsModelError::SolveRequired {
            operation: "write_model",
        })?;
        let c_path = c_path(path)?;
        // Exclusive borrow: HiGHS may update the model through this handle.
        let handle = solved.as_ptr().cast_mut();
        let status = unsafe { highs_sys::Highs_writeModel(handle, c_path.as_ptr()) };
        check_write("write_model", path, status)
    }

    /// Write the latest solution in HiGHS' readable text format.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HighsModel::write_model`].
    pub fn write_solution(&self, path: &Path) -> Result<(), HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "write_solution",
        })?;
        let c_path = c_path(path)?;
        let status =
            unsafe { highs_sys::Highs_writeSolutionPretty(solved.as_ptr(), c_path.as_ptr()) };
        check_write("write_solution", path, status)
    }
}

impl Default for HighsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HighsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let objective_value = self.solved.as_ref().map(|s| s.objective_value());
        f.debug_struct("HighsModel")
            .field("num_columns", &self.problem.num_cols())
            .field("num_rows", &self.problem.num_rows())
            .field("objective_sense", &self.objective_sense)
            .field("objective_value", &objective_value)
            .finish_non_exhaustive()
    }
}

/// Return the HiGHS solver version string, if available.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

fn c_path(path: &Path) -> Result<CString, HighsModelError> {
    path.to_str()
        .and_then(|value| CString::new(value).ok())
        .ok_or_else(|| HighsModelError::InvalidPath(path.to_path_buf()))
}

fn check_write(
    operation: &'static str,
    path: &Path,
    status: highs_sys::HighsInt,
) -> Result<(), HighsModelError> {
    if status < highs_sys::STATUS_OK {
        return Err(HighsModelError::WriteFailed {
            operation,
            path: path.to_path_buf(),
            status_code: status,
        });
    }
    debug!(
        component = "solver",
        operation,
        status = "success",
        path = %path.display(),
        "Wrote HiGHS output"
    );
    Ok(())
}

fn map_status(status: HighsModelStatus) -> HighsStatus {
    match status {
        HighsModelStatus::Optimal => HighsStatus::Optimal,
        HighsModelStatus::Infeasible => HighsStatus::Infeasible,
        HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
            HighsStatus::Unbounded
        }
        HighsModelStatus::ReachedTimeLimit => HighsStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => HighsStatus::ReachedIterationLimit,
        HighsModelStatus::LoadError
        | HighsModelStatus::ModelError
        | HighsModelStatus::PresolveError
        | HighsModelStatus::SolveError
        | HighsModelStatus::PostsolveError => HighsStatus::Error,
        _ => HighsStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_model() {
        let model = HighsModel::new();
        assert_eq!(model.columns(), 0);
        assert_eq!(model.rows(), 0);
    }

    #[test]
    fn test_objective_sense() {
        let mut model = HighsModel::new();
        assert_eq!(model.objective_sense, ObjectiveSense::Minimize);

        model.set_objective_sense(ObjectiveSense::Maximize);
        assert_eq!(model.objective_sense, ObjectiveSense::Maximize);
    }

    #[test]
    fn test_row_rejects_unknown_column() {
        let mut model = HighsModel::new();
        model.add_col(0.0, 1.0, 0.0, false);
        let err = model.add_row(0.0, 1.0, &[(3, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            HighsModelError::ColumnIndexOutOfBounds {
                column_index: 3,
                num_columns: 1
            }
        ));
    }

    #[test]
    fn test_values_require_solve() {
        let mut model = HighsModel::new();
        assert!(model.column_values().is_err());
        assert!(model.write_model(Path::new("model.lp")).is_err());
        assert!(!model.has_feasible_primal());
    }

    #[test]
    fn test_writers_after_solve() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.lp");
        let solution_path = dir.path().join("solution.txt");

        let mut model = HighsModel::new();
        model.set_quiet(true);
        let x = model.add_col(1.0, f64::INFINITY, 1.0, false);
        model.add_row(2.0, f64::INFINITY, &[(x, 1.0)]).unwrap();
        assert_eq!(model.solve(), HighsStatus::Optimal);

        model.write_model(&model_path).unwrap();
        model.write_solution(&solution_path).unwrap();
        assert!(model_path.exists());
        assert!(solution_path.exists());
        assert_eq!(model.column_values().unwrap(), vec![2.0]);
    }

    #[test]
    fn test_status_limits() {
        assert!(HighsStatus::ReachedTimeLimit.is_limit());
        assert!(HighsStatus::ReachedIterationLimit.is_limit());
        assert!(!HighsStatus::Optimal.is_limit());
        assert_eq!(HighsStatus::Unbounded.as_str(), "unbounded");
    }
}
