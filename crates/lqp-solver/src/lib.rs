//! Shared solver abstractions for lqp.
//!
//! This crate provides the boundary that solver adapters (like `lqp-highs`)
//! implement to solve an lqp [`Problem`](lqp_core::Problem).
//!
//! # Overview
//!
//! - [`SolverConfig`]: Configuration options for solver behavior
//! - [`Solver`]: Trait for solver implementations
//! - [`linear_problem`]: Linearize-before-solve helper for adapters
//! - [`NullSolver`]: Placeholder that never solves anything

mod config;
mod null;
mod traits;

pub use config::SolverConfig;
pub use lqp_core::{Solution, SolverStatus};
pub use null::NullSolver;
pub use traits::{Solver, linear_problem};
