use super::FloatT;
use num_traits::{Float, One};

// All internal math for the solver goes through these core traits,
// which are implemented generically for floats of type FloatT.

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)

pub trait VectorMath {
    type T;

    /// Elementwise scaling.
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise negation of entries.
    fn negate(&mut self) -> &mut Self;

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// Standard Euclidian or 2-norm distance from `self` to `y`
    fn dist(&self, y: &Self) -> Self::T;

    /// Sum of squares of the elements.
    fn sumsq(&self) -> Self::T;

    /// 2-norm
    fn norm(&self) -> Self::T;

    fn norm_inf_diff(&self, b: &Self) -> Self::T;

    //blas-like vector ops
    //--------------------

    /// BLAS-like shift and scale in place.  Produces `self = a*x+b*self`
    fn axpby(&mut self, a: Self::T, x: &Self, b: Self::T) -> &mut Self;
}

/// Vector-space operations on solver values.
///
/// Solver variables are not restricted to flat slices: a primal or dual
/// value can be any owned type implementing this trait, including nested
/// containers like [`TreeVec`](crate::algebra::TreeVec) and the
/// `(primal, dual)` pairs that represent KKT points.  Krylov iterations
/// and residual computations are written entirely against this trait, so
/// they never need to know the layout of the values they manipulate.

pub trait TreeMath: Clone {
    type T: FloatT;

    /// Total number of scalar entries.
    fn dim(&self) -> usize;

    /// `true` if `other` has identical shape, so that the two values
    /// can appear together in binary operations.
    fn same_structure(&self, other: &Self) -> bool;

    /// A value of identical structure to `self` with all entries zero.
    fn zeros_like(&self) -> Self;

    /// Elementwise negation of entries.
    fn negate(&mut self);

    /// Elementwise scaling.
    fn scale(&mut self, c: Self::T);

    /// BLAS-like shift and scale in place.  Produces `self = a*x+b*self`
    fn axpby(&mut self, a: Self::T, x: &Self, b: Self::T);

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// 2-norm
    fn norm(&self) -> Self::T {
        self.dot(self).sqrt()
    }

    /// Negation, non in-place version.
    fn negated(&self) -> Self {
        let mut out = self.clone();
        out.negate();
        out
    }

    /// Elementwise sum, non in-place version.
    fn add(&self, y: &Self) -> Self {
        let mut out = self.clone();
        out.axpby(Self::T::one(), y, Self::T::one());
        out
    }

    /// Elementwise difference, non in-place version.  Produces `self - y`.
    fn sub(&self, y: &Self) -> Self {
        let mut out = self.clone();
        out.axpby(-Self::T::one(), y, Self::T::one());
        out
    }
}

/// Matrix operations for matrices of [`FloatT`](crate::algebra::FloatT)

pub(crate) trait MatrixVectorMultiply {
    type T: FloatT;

    /// BLAS-like general matrix-vector multiply.  Produces `y = a*self*x + b*y`
    fn gemv(&self, y: &mut [Self::T], x: &[Self::T], a: Self::T, b: Self::T);
}
