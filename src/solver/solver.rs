use crate::algebra::{CscMatrix, FloatT, LinearOperator, ShapedMatrix, TreeMath};
use crate::krylov::{Gmres, KrylovResult, KrylovSolver};
use crate::solver::{KktResidual, SaddleOperator, SolverSettings};
use thiserror::Error;

// ---------------------------------
// solution and error types
// ---------------------------------

/// Error type returned when problem data dimensions are inconsistent
#[derive(Error, Debug)]
pub enum ShapeError {
    /// the objective operator is not square
    #[error("Q must be square, got {nrows} x {ncols}")]
    ObjectiveNotSquare {
        /// row count of the offending matrix
        nrows: usize,
        /// column count of the offending matrix
        ncols: usize,
    },
    /// the linear cost has the wrong length
    #[error("c has {got} entries but Q operates on {expected}-vectors")]
    ObjectiveMismatch {
        /// variable count implied by Q
        expected: usize,
        /// entries supplied in c
        got: usize,
    },
    /// the constraint matrix has the wrong column count
    #[error("A has {got} columns but the problem has {expected} variables")]
    ConstraintColsMismatch {
        /// variable count implied by Q
        expected: usize,
        /// column count of A
        got: usize,
    },
    /// the constraint right hand side has the wrong length
    #[error("b has {got} entries but A has {expected} rows")]
    ConstraintRowsMismatch {
        /// row count of A
        expected: usize,
        /// entries supplied in b
        got: usize,
    },
}

/// Solution of an equality constrained QP.
#[derive(Debug, Clone, PartialEq)]
pub struct KKTSolution<P, D> {
    /// primal solution
    pub primal: P,
    /// multipliers of the equality constraints
    pub dual_eq: D,
    /// multipliers of inequality constraints.  Always `None` for this
    /// solver.  The field exists so that the solution shape matches
    /// solvers for the general constrained problem class.
    pub dual_ineq: Option<D>,
}

impl<P, D> KKTSolution<P, D>
where
    P: Clone,
    D: Clone,
{
    /// the `(primal, dual_eq)` pair as a single KKT point
    pub fn point(&self) -> (P, D) {
        (self.primal.clone(), self.dual_eq.clone())
    }
}

// ---------------------------------
// top level solver type
// ---------------------------------

/// Solver for equality constrained quadratic programs
///
/// ```text
/// minimize    (1/2) x'Qx + c'x
/// subject to     Ax = b
/// ```
///
/// The optimality conditions are the linear saddle point system
///
/// ```text
/// [Q  A'] [x]   [-c]
/// [A  0 ] [y] = [ b]
/// ```
///
/// which is handed to an iterative Krylov method, by default restarted
/// GMRES.  `Q` and `A` enter only through their action on vectors.
/// There is no warm starting: every solve iterates from the Krylov
/// method's zero start.
///
/// __Example__
/// ```no_run
/// use sella::algebra::CscMatrix;
/// use sella::solver::{EqualityConstrainedQP, SolverSettings};
///
/// // minimize x'x  subject to  x_1 + x_2 = 1
/// let Q = CscMatrix::from(&[
///     [2., 0.], //
///     [0., 2.],
/// ]);
/// let c = [0., 0.];
/// let A = CscMatrix::from(&[[1., 1.]]);
/// let b = [1.];
///
/// let solver = EqualityConstrainedQP::<f64>::new(SolverSettings::default());
/// let solution = solver.solve(&Q, &c, &A, &b).unwrap();
/// // solution.primal = [0.5, 0.5], solution.dual_eq = [-1.0]
/// ```
pub struct EqualityConstrainedQP<T = f64, S = Gmres>
where
    T: FloatT,
{
    /// solver configuration
    pub settings: SolverSettings<T>,
    pub(crate) krylov: S,
}

impl<T> EqualityConstrainedQP<T, Gmres>
where
    T: FloatT,
{
    /// solver using restarted GMRES configured from the settings
    pub fn new(settings: SolverSettings<T>) -> Self {
        let krylov = Gmres::new(settings.gmres_restart);
        Self { settings, krylov }
    }
}

impl<T, S> EqualityConstrainedQP<T, S>
where
    T: FloatT,
    S: KrylovSolver<T>,
{
    /// solver using a caller supplied Krylov method
    pub fn with_krylov(settings: SolverSettings<T>, krylov: S) -> Self {
        Self { settings, krylov }
    }

    /// Solve with explicit sparse matrix data.
    ///
    /// Checks dimensional compatibility of the data before solving.
    pub fn solve(
        &self,
        Q: &CscMatrix<T>,
        c: &[T],
        A: &CscMatrix<T>,
        b: &[T],
    ) -> Result<KKTSolution<Vec<T>, Vec<T>>, ShapeError> {
        check_dimensions(Q, c, A, b)?;
        Ok(self.solve_with_operators(Q, &c.to_vec(), A, &b.to_vec()))
    }

    /// Solve with matrix free problem data.
    ///
    /// No dimensional validation is possible on opaque operators, so
    /// structurally inconsistent data panics inside the vector
    /// operations rather than returning an error.
    pub fn solve_with_operators<P, D, Q, A>(&self, q: &Q, c: &P, a: &A, b: &D) -> KKTSolution<P, D>
    where
        P: TreeMath<T = T>,
        D: TreeMath<T = T>,
        Q: LinearOperator<T = T, Domain = P, Range = P>,
        A: LinearOperator<T = T, Domain = P, Range = D>,
    {
        _print_banner(self.settings.verbose);
        if self.settings.verbose {
            self.print_configuration(c.dim(), b.dim());
        }

        let op = SaddleOperator::new(q, a);
        let rhs = (c.negated(), b.clone());
        let result = self.krylov.solve(
            |u| op.apply(u),
            &rhs,
            self.settings.tol,
            self.settings.max_iter,
        );

        if self.settings.verbose {
            self.print_summary(&result);
        }

        let (primal, dual_eq) = result.x;
        KKTSolution {
            primal,
            dual_eq,
            dual_ineq: None,
        }
    }

    /// 2-norm of the KKT residual of `point` for the given problem data.
    ///
    /// A converged solve returns a point whose error is at most `tol`
    /// relative to the norm of `(-c, b)`.  A larger error means the
    /// Krylov method stopped on its iteration limit and the point
    /// should not be trusted.
    pub fn l2_optimality_error<P, D, Q, A>(&self, q: &Q, c: &P, a: &A, b: &D, point: &(P, D)) -> T
    where
        P: TreeMath<T = T>,
        D: TreeMath<T = T>,
        Q: LinearOperator<T = T, Domain = P, Range = P>,
        A: LinearOperator<T = T, Domain = P, Range = D>,
    {
        KktResidual::new(q, c, a, b).l2_optimality_error(point)
    }

    // ---------------------------------
    // verbose printing
    // ---------------------------------

    fn print_configuration(&self, primal_dim: usize, dual_dim: usize) {
        println!("problem:");
        println!("  variables     = {}", primal_dim);
        println!("  equality rows = {}", dual_dim);
        println!("settings:");
        println!(
            "  method = {}, tol = {:.1e}, max iter = {}",
            self.krylov.name(),
            self.settings.tol,
            self.settings.max_iter
        );
    }

    fn print_summary<V>(&self, result: &KrylovResult<V, T>) {
        let status = if result.converged {
            "converged"
        } else {
            "max iterations reached"
        };
        println!(
            "terminated: {} ({} operator applications, relative residual {:.2e})",
            status, result.iterations, result.relres
        );
    }
}

fn _print_banner(is_verbose: bool) {
    if !is_verbose {
        return;
    }

    println!("-------------------------------------------------------------");
    println!(
        "        sella v{}  -  equality constrained QP solver",
        crate::VERSION
    );
    println!("-------------------------------------------------------------");
}

fn check_dimensions<T: FloatT>(
    Q: &CscMatrix<T>,
    c: &[T],
    A: &CscMatrix<T>,
    b: &[T],
) -> Result<(), ShapeError> {
    if !Q.is_square() {
        return Err(ShapeError::ObjectiveNotSquare {
            nrows: Q.m,
            ncols: Q.n,
        });
    }
    if c.len() != Q.n {
        return Err(ShapeError::ObjectiveMismatch {
            expected: Q.n,
            got: c.len(),
        });
    }
    if A.n != Q.n {
        return Err(ShapeError::ConstraintColsMismatch {
            expected: Q.n,
            got: A.n,
        });
    }
    if b.len() != A.m {
        return Err(ShapeError::ConstraintRowsMismatch {
            expected: A.m,
            got: b.len(),
        });
    }
    Ok(())
}
