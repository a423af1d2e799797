use crate::algebra::{Adjoint, CscMatrix, FloatT, MatrixVectorMultiply, TreeMath};
use std::marker::PhantomData;

/// A linear map between two vector spaces, accessed only through its
/// action on vectors.
///
/// This is the solver's sole interface to the objective matrix `Q` and the
/// constraint matrix `A`.  Implementations never expose matrix entries;
/// an explicit [`CscMatrix`](crate::algebra::CscMatrix) and a pair of
/// closures wrapped in a [`FunctionalOperator`] are interchangeable.
///
/// The adjoint is always supplied by the implementor.  Nothing here
/// derives `Aᵀ` from `A`, so an operator whose `apply_adjoint` is not the
/// true adjoint of `apply` will produce wrong multipliers and derivatives
/// without warning.
pub trait LinearOperator {
    type T: FloatT;
    /// input space of the forward map
    type Domain: TreeMath<T = Self::T>;
    /// output space of the forward map
    type Range: TreeMath<T = Self::T>;

    /// forward action `A*x`
    fn apply(&self, x: &Self::Domain) -> Self::Range;

    /// adjoint action `A'*y`
    fn apply_adjoint(&self, y: &Self::Range) -> Self::Domain;

    /// joint forward / adjoint action `(A*x, A'*y)`.
    ///
    /// Must agree with calling [`apply`](LinearOperator::apply) and
    /// [`apply_adjoint`](LinearOperator::apply_adjoint) separately.
    /// Implementors that can share a traversal of the operator data
    /// may override this to fuse the two passes.
    fn apply_and_adjoint(&self, x: &Self::Domain, y: &Self::Range) -> (Self::Range, Self::Domain) {
        (self.apply(x), self.apply_adjoint(y))
    }
}

impl<T: FloatT> LinearOperator for CscMatrix<T> {
    type T = T;
    type Domain = Vec<T>;
    type Range = Vec<T>;

    fn apply(&self, x: &Vec<T>) -> Vec<T> {
        let mut y = vec![T::zero(); self.m];
        self.gemv(&mut y, x, T::one(), T::zero());
        y
    }

    fn apply_adjoint(&self, y: &Vec<T>) -> Vec<T> {
        let mut x = vec![T::zero(); self.n];
        self.t().gemv(&mut x, y, T::one(), T::zero());
        x
    }
}

impl<T: FloatT> LinearOperator for Adjoint<'_, CscMatrix<T>> {
    type T = T;
    type Domain = Vec<T>;
    type Range = Vec<T>;

    fn apply(&self, x: &Vec<T>) -> Vec<T> {
        self.src.apply_adjoint(x)
    }

    fn apply_adjoint(&self, y: &Vec<T>) -> Vec<T> {
        self.src.apply(y)
    }
}

/// A [`LinearOperator`] built from a pair of closures.
///
/// The forward map and its adjoint are both caller supplied.  This is
/// the entry point for matrix-free problems: any function that applies
/// a linear map to a [`TreeMath`] value can act as `Q` or `A` without
/// ever forming a matrix.
///
/// ```no_run
/// use sella::algebra::FunctionalOperator;
///
/// // the diagonal map x -> [2x_0, 3x_1] is its own adjoint
/// let op: FunctionalOperator<Vec<f64>, Vec<f64>, _, _> = FunctionalOperator::new(
///     |x: &Vec<f64>| vec![2. * x[0], 3. * x[1]],
///     |y: &Vec<f64>| vec![2. * y[0], 3. * y[1]],
/// );
/// ```
pub struct FunctionalOperator<P, D, F, G> {
    fwd: F,
    adj: G,
    marker: PhantomData<fn(&P) -> D>,
}

impl<P, D, F, G> FunctionalOperator<P, D, F, G> {
    /// wrap a forward map and its adjoint
    pub fn new(fwd: F, adj: G) -> Self {
        Self {
            fwd,
            adj,
            marker: PhantomData,
        }
    }
}

impl<T, P, D, F, G> LinearOperator for FunctionalOperator<P, D, F, G>
where
    T: FloatT,
    P: TreeMath<T = T>,
    D: TreeMath<T = T>,
    F: Fn(&P) -> D,
    G: Fn(&D) -> P,
{
    type T = T;
    type Domain = P;
    type Range = D;

    fn apply(&self, x: &P) -> D {
        (self.fwd)(x)
    }

    fn apply_adjoint(&self, y: &D) -> P {
        (self.adj)(y)
    }
}

/// The zero map between two fixed spaces.
///
/// Holds one template value for each space so that outputs can be
/// shaped without the operator ever inspecting its input values.  Used
/// for absent objective terms (`Q = 0`) and for directions in which
/// problem data does not vary when differentiating solutions.
pub struct ZeroOperator<P, D> {
    domain: P,
    range: D,
}

impl<P, D> ZeroOperator<P, D> {
    /// zero map between the spaces of the two template values
    pub fn new(domain: P, range: D) -> Self {
        Self { domain, range }
    }
}

impl<T, P, D> LinearOperator for ZeroOperator<P, D>
where
    T: FloatT,
    P: TreeMath<T = T>,
    D: TreeMath<T = T>,
{
    type T = T;
    type Domain = P;
    type Range = D;

    fn apply(&self, x: &P) -> D {
        debug_assert!(x.same_structure(&self.domain));
        self.range.zeros_like()
    }

    fn apply_adjoint(&self, y: &D) -> P {
        debug_assert!(y.same_structure(&self.range));
        self.domain.zeros_like()
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod test {
    use crate::algebra::*;

    #[test]
    fn test_csc_operator() {
        // A =
        //[1.  3.  5.]
        //[2.  0.  6.]
        let A = CscMatrix::from(&[
            [1., 3., 5.], //
            [2., 0., 6.],
        ]);

        let x = vec![1., 1., 1.];
        let y = vec![1., -1.];

        assert_eq!(A.apply(&x), vec![9., 8.]);
        assert_eq!(A.apply_adjoint(&y), vec![-1., 3., -1.]);

        let (ax, aty) = A.apply_and_adjoint(&x, &y);
        assert_eq!(ax, A.apply(&x));
        assert_eq!(aty, A.apply_adjoint(&y));

        // the adjoint view swaps the two actions
        let At = A.t();
        assert_eq!(At.apply(&y), A.apply_adjoint(&y));
        assert_eq!(At.apply_adjoint(&x), A.apply(&x));
    }

    #[test]
    fn test_functional_operator() {
        let op = FunctionalOperator::new(
            |x: &Vec<f64>| vec![2. * x[0], 3. * x[1]],
            |y: &Vec<f64>| vec![2. * y[0], 3. * y[1]],
        );

        let x = vec![1., 1.];
        let y = vec![1., 2.];
        assert_eq!(op.apply(&x), vec![2., 3.]);
        assert_eq!(op.apply_adjoint(&y), vec![2., 6.]);

        // adjoint identity <Ax, y> == <x, A'y>
        let lhs = op.apply(&x).dot(&y);
        let rhs = x.dot(&op.apply_adjoint(&y));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_zero_operator() {
        let op = ZeroOperator::new(vec![0.; 3], vec![0.; 2]);
        assert_eq!(op.apply(&vec![1., 2., 3.]), vec![0., 0.]);
        assert_eq!(op.apply_adjoint(&vec![1., 2.]), vec![0., 0., 0.]);
    }
}
