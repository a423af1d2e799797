use crate::algebra::{FloatT, LinearOperator, TreeMath};

/// KKT residual of a candidate solution.
///
/// For a point `(x, y)` the optimality conditions of the problem are
///
/// ```text
/// stationarity    Qx + c + A'y = 0
/// feasibility     Ax - b       = 0
/// ```
///
/// Each evaluation makes a single fused pass over the constraint
/// operator.  The solver uses this to report solution quality, and it
/// is public so that callers can audit any candidate point against the
/// problem data, including points produced elsewhere.
pub struct KktResidual<'a, Q, A, P, D> {
    q: &'a Q,
    c: &'a P,
    a: &'a A,
    b: &'a D,
}

impl<'a, T, P, D, Q, A> KktResidual<'a, Q, A, P, D>
where
    T: FloatT,
    P: TreeMath<T = T>,
    D: TreeMath<T = T>,
    Q: LinearOperator<T = T, Domain = P, Range = P>,
    A: LinearOperator<T = T, Domain = P, Range = D>,
{
    /// residual function for the given problem data
    pub fn new(q: &'a Q, c: &'a P, a: &'a A, b: &'a D) -> Self {
        Self { q, c, a, b }
    }

    /// gradient of the unconstrained objective at `x`, `Qx + c`
    pub fn objective_grad(&self, x: &P) -> P {
        let mut g = self.q.apply(x);
        g.axpby(T::one(), self.c, T::one());
        g
    }

    /// the `(stationarity, feasibility)` residual blocks at `point`
    pub fn residual(&self, point: &(P, D)) -> (P, D) {
        let (x, y) = point;
        let (ax, aty) = self.a.apply_and_adjoint(x, y);

        // Qx + c + A'y
        let mut stat = self.objective_grad(x);
        stat.axpby(T::one(), &aty, T::one());

        // Ax - b
        let mut feas = ax;
        feas.axpby(-T::one(), self.b, T::one());

        (stat, feas)
    }

    /// 2-norm of the stacked KKT residual at `point`
    pub fn l2_optimality_error(&self, point: &(P, D)) -> T {
        self.residual(point).norm()
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod test {
    use crate::algebra::*;
    use crate::solver::*;

    #[test]
    fn test_kkt_residual_at_optimum() {
        // minimize x'x subject to x_1 + x_2 = 1, solved by
        // x = (0.5, 0.5) with multiplier -1
        let Q = CscMatrix::from(&[
            [2., 0.], //
            [0., 2.],
        ]);
        let c = vec![0., 0.];
        let A = CscMatrix::from(&[[1., 1.]]);
        let b = vec![1.];

        let kkt = KktResidual::new(&Q, &c, &A, &b);

        let opt = (vec![0.5, 0.5], vec![-1.]);
        let (stat, feas) = kkt.residual(&opt);
        assert_eq!(stat, vec![0., 0.]);
        assert_eq!(feas, vec![0.]);
        assert_eq!(kkt.l2_optimality_error(&opt), 0.);

        // the unconstrained gradient excludes the constraint term
        assert_eq!(kkt.objective_grad(&opt.0), vec![1., 1.]);

        // a feasible but nonstationary point
        let bad = (vec![1., 0.], vec![0.]);
        assert_eq!(kkt.l2_optimality_error(&bad), 2.);
    }
}
