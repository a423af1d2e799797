use crate::algebra::{FloatT, LinearOperator, TreeMath};

/// The KKT saddle point operator
///
/// ```text
/// M = [Q  A']
///     [A  0 ]
/// ```
///
/// acting on `(primal, dual)` pairs.  This is the system matrix for the
/// solve itself and for solution differentiation, and it is never
/// assembled: each application costs one `apply` of `Q` and one fused
/// [`apply_and_adjoint`](crate::algebra::LinearOperator::apply_and_adjoint)
/// of `A`.
///
/// `Q` must be self adjoint, as any well posed quadratic objective is.
/// `M` is then self adjoint too, so `apply_adjoint` is the same map
/// as `apply`.
pub struct SaddleOperator<'a, Q, A> {
    q: &'a Q,
    a: &'a A,
}

impl<'a, Q, A> SaddleOperator<'a, Q, A> {
    /// saddle operator over the given objective and constraint maps
    pub fn new(q: &'a Q, a: &'a A) -> Self {
        Self { q, a }
    }
}

impl<T, P, D, Q, A> LinearOperator for SaddleOperator<'_, Q, A>
where
    T: FloatT,
    P: TreeMath<T = T>,
    D: TreeMath<T = T>,
    Q: LinearOperator<T = T, Domain = P, Range = P>,
    A: LinearOperator<T = T, Domain = P, Range = D>,
{
    type T = T;
    type Domain = (P, D);
    type Range = (P, D);

    fn apply(&self, u: &(P, D)) -> (P, D) {
        let (x, y) = u;
        let (ax, aty) = self.a.apply_and_adjoint(x, y);

        let mut top = self.q.apply(x);
        top.axpby(T::one(), &aty, T::one());
        (top, ax)
    }

    fn apply_adjoint(&self, u: &(P, D)) -> (P, D) {
        // self adjoint since Q is
        self.apply(u)
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod test {
    use crate::algebra::*;
    use crate::solver::*;

    #[test]
    fn test_saddle_apply() {
        let Q = CscMatrix::from(&[
            [2., 0.], //
            [0., 2.],
        ]);
        let A = CscMatrix::from(&[[1., 1.]]);

        let M = SaddleOperator::new(&Q, &A);
        let u = (vec![1., 2.], vec![3.]);

        // [Q A'][x]   [Qx + A'y]
        // [A 0 ][y] = [Ax      ]
        let (top, bottom) = M.apply(&u);
        assert_eq!(top, vec![5., 7.]);
        assert_eq!(bottom, vec![3.]);
    }

    #[test]
    fn test_saddle_self_adjoint() {
        let Q = CscMatrix::from(&[
            [2., 1.], //
            [1., 3.],
        ]);
        let A = CscMatrix::from(&[[1., -1.]]);
        let M = SaddleOperator::new(&Q, &A);

        let u = (vec![1., 2.], vec![-1.]);
        let v = (vec![0.5, -1.], vec![2.]);

        // <Mu,v> == <u,Mv> for a symmetric Q
        assert_eq!(M.apply(&u).dot(&v), u.dot(&M.apply(&v)));
    }
}
