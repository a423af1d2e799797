//! Iterative Krylov solvers for saddle point KKT systems.
//!
//! These solvers access the system matrix only through a matvec closure
//! over [`TreeMath`](crate::algebra::TreeMath) values, which is what lets
//! the rest of the crate stay matrix-free.  [`Gmres`] is the default
//! method and requires only that the system is nonsingular.
//! [`ConjugateGradient`] is provided for systems known to be symmetric
//! positive definite.

mod cg;
pub use cg::*;
mod gmres;
pub use gmres::*;

use crate::algebra::{FloatT, TreeMath};

/// Output of a Krylov solve.
#[derive(Debug, Clone)]
pub struct KrylovResult<V, T> {
    /// candidate solution.  The best iterate found when not converged.
    pub x: V,
    /// number of operator applications performed
    pub iterations: u32,
    /// final relative residual estimate
    pub relres: T,
    /// true if the solve reached the requested tolerance
    pub converged: bool,
}

/// An iterative solver for square linear systems `M*x = rhs`, where the
/// matrix `M` is known only through its action `v -> M*v`.
///
/// `tol` is measured relative to the norm of `rhs`, and `max_iter` caps
/// the number of operator applications.  Implementations start from the
/// zero vector and return their best iterate even when the tolerance is
/// not reached.
pub trait KrylovSolver<T: FloatT> {
    /// short method name for reporting
    fn name(&self) -> &'static str;

    /// approximately solve `M*x = rhs`
    fn solve<V, M>(&self, matvec: M, rhs: &V, tol: T, max_iter: u32) -> KrylovResult<V, T>
    where
        V: TreeMath<T = T>,
        M: Fn(&V) -> V;
}
