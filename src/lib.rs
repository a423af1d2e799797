//! __sella__ is a matrix-free solver for equality-constrained quadratic programs:
//!
//! ```text
//! minimize    (1/2) xᵀQx + cᵀx
//! subject to     Ax = b
//! ```
//!
//! with decision variable `x`, a positive semidefinite objective operator `Q`,
//! a linear term `c`, and equality constraints described by `A` and `b`.  The
//! solver returns both the primal solution and the multipliers of the equality
//! constraints.
//!
//! Neither `Q` nor `A` is ever materialized.  Both enter only through their
//! action on vectors via the [`LinearOperator`](crate::algebra::LinearOperator)
//! trait, so explicit sparse matrices and closures over structured values are
//! interchangeable.  Solutions are computed by applying an iterative Krylov
//! method to the KKT optimality conditions
//!
//! ```text
//! ┌        ┐ ┌   ┐   ┌    ┐
//! │ Q   Aᵀ │ │ x │   │ -c │
//! │ A   0  │ │ λ │ = │  b │
//! └        ┘ └   ┘   └    ┘
//! ```
//!
//! which also makes solutions differentiable in the problem data through the
//! implicit function theorem; see
//! [`EqualityConstrainedQP`](crate::solver::EqualityConstrainedQP).

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod krylov;
pub mod solver;
