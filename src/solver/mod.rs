//! Solver main module.
//!
//! [`EqualityConstrainedQP`] assembles the pieces defined here: problem
//! data enters through [`LinearOperator`](crate::algebra::LinearOperator)s,
//! the KKT conditions become a single [`SaddleOperator`] over
//! `(primal, dual)` pairs, and a [`KrylovSolver`](crate::krylov::KrylovSolver)
//! produces the solution.  [`KktResidual`] measures optimality of any
//! candidate point, both inside the solver and for external diagnostics.

#![allow(non_snake_case)]

// internal module structure
mod kkt;
pub use kkt::*;
mod residuals;
pub use residuals::*;
mod settings;
pub use settings::*;
mod solver;
pub use solver::*;

// solution differentiation lives in its own file but only adds
// methods to EqualityConstrainedQP
mod diff;

#[cfg(feature = "serde")]
mod json;
#[cfg(feature = "serde")]
pub use json::*;
