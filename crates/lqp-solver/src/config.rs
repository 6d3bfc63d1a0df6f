//! Solver configuration types.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration options for solver behavior.
///
/// This struct provides a unified way to configure solver parameters
/// across different solver backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Keep integer and binary variables integral. When false the
    /// continuous relaxation is solved.
    pub use_mip: bool,
    /// Let the solver print its own log.
    pub verbose: bool,
    /// Enable the solver's presolve phase.
    pub presolve: bool,
    /// Wall-clock limit. `None` means no limit.
    pub timeout: Option<Duration>,
    /// Write the problem in the solver's native format to this path.
    pub problem_output: Option<PathBuf>,
    /// Write the solution in the solver's native format to this path.
    pub solution_output: Option<PathBuf>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            use_mip: false,
            verbose: true,
            presolve: false,
            timeout: None,
            problem_output: None,
            solution_output: None,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable integrality of integer and binary variables.
    pub fn with_mip(mut self, enabled: bool) -> Self {
        self.use_mip = enabled;
        self
    }

    /// Enable or disable solver output.
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Enable or disable presolve.
    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = enabled;
        self
    }

    /// Set the time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_problem_output(mut self, path: impl AsRef<Path>) -> Self {
        self.problem_output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_solution_output(mut self, path: impl AsRef<Path>) -> Self {
        self.solution_output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Time limit in seconds, if any.
    pub fn timeout_seconds(&self) -> Option<f64> {
        self.timeout.map(|timeout| timeout.as_secs_f64())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SolverConfig::new();
        assert!(!config.use_mip);
        assert!(config.verbose);
        assert!(!config.presolve);
        assert_eq!(config.timeout, None);
        assert_eq!(config.timeout_seconds(), None);
        assert!(config.problem_output.is_none());
        assert!(config.solution_output.is_none());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = SolverConfig::new()
            .with_mip(true)
            .with_verbose(false)
            .with_presolve(true)
            .with_timeout(Duration::from_millis(1500))
            .with_problem_output("problem.mps")
            .with_solution_output("solution.txt");

        assert!(config.use_mip);
        assert!(!config.verbose);
        assert!(config.presolve);
        assert_eq!(config.timeout_seconds(), Some(1.5));
        assert_eq!(config.problem_output, Some(PathBuf::from("problem.mps")));
        assert_eq!(config.solution_output, Some(PathBuf::from("solution.txt")));
    }

    #[test]
    fn test_config_clone() {
        let config1 = SolverConfig::new().with_mip(true);
        let config2 = config1.clone();
        assert_eq!(config1, config2);
    }
}
