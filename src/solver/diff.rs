//! Sensitivities of the solution map through implicit differentiation.
//!
//! A KKT point is the solution of a linear system in the problem data,
//! so its derivatives are themselves solutions of saddle point systems
//! with the same operator.  Both directions below therefore cost one
//! additional Krylov solve and reuse the solver's own settings.

use crate::algebra::{FloatT, LinearOperator, TreeMath};
use crate::krylov::KrylovSolver;
use crate::solver::{EqualityConstrainedQP, KktResidual, SaddleOperator};

impl<T, S> EqualityConstrainedQP<T, S>
where
    T: FloatT,
    S: KrylovSolver<T>,
{
    /// Directional derivative of the solution map.
    ///
    /// Takes a KKT point `(x, y)` of the problem `(Q, c, A, b)` and
    /// perturbation directions `(dq, dc, da, db)` of the data, and
    /// returns the induced perturbation `(dx, dy)` of the point.
    /// Differentiating the stationary KKT system gives
    ///
    /// ```text
    /// [Q  A'] [dx]     [dQ x + dc + dA'y]
    /// [A  0 ] [dy] = - [dA x - db       ]
    /// ```
    ///
    /// The right hand side is the KKT residual of the perturbation data
    /// evaluated at `(x, y)`, negated.  Directions that leave part of
    /// the data fixed are expressed with zero values, e.g. a
    /// [`ZeroOperator`](crate::algebra::ZeroOperator) for `dq` when
    /// only the linear data varies.
    ///
    /// The accuracy of the result is limited by the accuracy of the
    /// supplied point and by the solver tolerance.
    pub fn solution_jvp<P, D, Q, A, DQ, DA>(
        &self,
        q: &Q,
        a: &A,
        point: &(P, D),
        dq: &DQ,
        dc: &P,
        da: &DA,
        db: &D,
    ) -> (P, D)
    where
        P: TreeMath<T = T>,
        D: TreeMath<T = T>,
        Q: LinearOperator<T = T, Domain = P, Range = P>,
        A: LinearOperator<T = T, Domain = P, Range = D>,
        DQ: LinearOperator<T = T, Domain = P, Range = P>,
        DA: LinearOperator<T = T, Domain = P, Range = D>,
    {
        let mut rhs = KktResidual::new(dq, dc, da, db).residual(point);
        rhs.negate();
        self.solve_saddle(q, a, &rhs)
    }

    /// Adjoint sensitivity of the solution map in the linear data.
    ///
    /// Propagates a cotangent `(x̄, ȳ)` on the solution back to
    /// cotangents `(c̄, b̄)` on the linear data.  The solution is
    /// `(x, y) = M⁻¹ (-c, b)` with `M` the KKT operator, and `M` is
    /// self adjoint, so the adjoint system is a solve with `M` itself:
    ///
    /// ```text
    /// [Q  A'] [w_p]   [x̄]                 c̄ = -w_p
    /// [A  0 ] [w_d] = [ȳ]    and then     b̄ =  w_d
    /// ```
    ///
    /// Sensitivities with respect to `Q` and `A` are outer products of
    /// `w` with the point and have no operator free representation, so
    /// only the linear data is handled here.
    pub fn solution_vjp_linear<P, D, Q, A>(&self, q: &Q, a: &A, cotangent: &(P, D)) -> (P, D)
    where
        P: TreeMath<T = T>,
        D: TreeMath<T = T>,
        Q: LinearOperator<T = T, Domain = P, Range = P>,
        A: LinearOperator<T = T, Domain = P, Range = D>,
    {
        let (mut w_p, w_d) = self.solve_saddle(q, a, cotangent);
        w_p.negate();
        (w_p, w_d)
    }

    // one Krylov solve against the saddle operator, shared by the
    // forward and adjoint sensitivity systems
    fn solve_saddle<P, D, Q, A>(&self, q: &Q, a: &A, rhs: &(P, D)) -> (P, D)
    where
        P: TreeMath<T = T>,
        D: TreeMath<T = T>,
        Q: LinearOperator<T = T, Domain = P, Range = P>,
        A: LinearOperator<T = T, Domain = P, Range = D>,
    {
        let op = SaddleOperator::new(q, a);
        self.krylov
            .solve(
                |u| op.apply(u),
                rhs,
                self.settings.tol,
                self.settings.max_iter,
            )
            .x
    }
}
