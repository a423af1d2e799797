// TreeMath implementations for the solver's built-in value types:
// flat Vec storage, (primal, dual) pairs and the nested TreeVec container.

mod treevec;
pub use treevec::*;

use crate::algebra::{FloatT, TreeMath, VectorMath};

impl<T: FloatT> TreeMath for Vec<T> {
    type T = T;

    fn dim(&self) -> usize {
        self.len()
    }

    fn same_structure(&self, other: &Self) -> bool {
        self.len() == other.len()
    }

    fn zeros_like(&self) -> Self {
        vec![T::zero(); self.len()]
    }

    fn negate(&mut self) {
        self.as_mut_slice().negate();
    }

    fn scale(&mut self, c: T) {
        self.as_mut_slice().scale(c);
    }

    fn axpby(&mut self, a: T, x: &Self, b: T) {
        self.as_mut_slice().axpby(a, x, b);
    }

    fn dot(&self, y: &Self) -> T {
        self.as_slice().dot(y)
    }
}

// KKT points are (primal, dual) pairs, with the pair treated as
// the concatenation of its two halves.
impl<T, P, D> TreeMath for (P, D)
where
    T: FloatT,
    P: TreeMath<T = T>,
    D: TreeMath<T = T>,
{
    type T = T;

    fn dim(&self) -> usize {
        self.0.dim() + self.1.dim()
    }

    fn same_structure(&self, other: &Self) -> bool {
        self.0.same_structure(&other.0) && self.1.same_structure(&other.1)
    }

    fn zeros_like(&self) -> Self {
        (self.0.zeros_like(), self.1.zeros_like())
    }

    fn negate(&mut self) {
        self.0.negate();
        self.1.negate();
    }

    fn scale(&mut self, c: T) {
        self.0.scale(c);
        self.1.scale(c);
    }

    fn axpby(&mut self, a: T, x: &Self, b: T) {
        self.0.axpby(a, &x.0, b);
        self.1.axpby(a, &x.1, b);
    }

    fn dot(&self, y: &Self) -> T {
        self.0.dot(&y.0) + self.1.dot(&y.1)
    }
}

#[cfg(test)]
mod test {
    use crate::algebra::*;

    #[test]
    fn test_pair_math() {
        let u = (vec![1., 2.], vec![3.]);
        let v = (vec![2., 0.], vec![-1.]);

        assert_eq!(u.dim(), 3);
        assert!(u.same_structure(&v));
        assert!(!u.same_structure(&(vec![1.], vec![1.])));

        assert_eq!(u.dot(&v), 2. - 3.);
        assert_eq!(u.zeros_like(), (vec![0., 0.], vec![0.]));

        let mut w = u.clone();
        w.axpby(2., &v, -1.);
        assert_eq!(w, (vec![3., -2.], vec![-5.]));

        assert_eq!(u.sub(&v), (vec![-1., 2.], vec![4.]));
        assert_eq!(u.negated(), (vec![-1., -2.], vec![-3.]));
    }

    #[test]
    fn test_vec_norm() {
        let x = vec![3., 4.];
        assert_eq!(TreeMath::norm(&x), 5.);
        assert_eq!(x.as_slice().norm(), 5.);
    }
}
