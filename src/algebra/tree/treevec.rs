use crate::algebra::{FloatT, TreeMath, VectorMath};
use std::collections::BTreeMap;
use std::iter::zip;

/// Nested container of numeric values, treated as a single vector.
///
/// Structured variables keep their natural shape rather than being
/// flattened into one long slice: a `TreeVec` is either a flat
/// [`Leaf`](TreeVec::Leaf) of floats, an ordered
/// [`Seq`](TreeVec::Seq) of subtrees, or a string keyed
/// [`Map`](TreeVec::Map) of subtrees.  All vector space operations
/// traverse the nesting recursively, so a `TreeVec` can be used as a
/// primal or dual variable anywhere a `Vec` can.
///
/// Map entries are kept in sorted key order, so two maps with equal
/// keys always traverse their subtrees in the same order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeVec<T = f64> {
    /// flat vector of numeric entries
    Leaf(Vec<T>),
    /// ordered sequence of subtrees
    Seq(Vec<TreeVec<T>>),
    /// string keyed mapping of subtrees
    Map(BTreeMap<String, TreeVec<T>>),
}

impl<T: FloatT> TreeVec<T> {
    /// a flat leaf vector
    pub fn leaf(values: Vec<T>) -> Self {
        TreeVec::Leaf(values)
    }

    /// an ordered sequence of subtrees
    pub fn seq(items: Vec<TreeVec<T>>) -> Self {
        TreeVec::Seq(items)
    }

    /// a string keyed mapping of subtrees
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TreeVec<T>)>,
    {
        TreeVec::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<T: FloatT> TreeMath for TreeVec<T> {
    type T = T;

    fn dim(&self) -> usize {
        match self {
            TreeVec::Leaf(v) => v.len(),
            TreeVec::Seq(items) => items.iter().map(|t| t.dim()).sum(),
            TreeVec::Map(entries) => entries.values().map(|t| t.dim()).sum(),
        }
    }

    fn same_structure(&self, other: &Self) -> bool {
        match (self, other) {
            (TreeVec::Leaf(a), TreeVec::Leaf(b)) => a.len() == b.len(),
            (TreeVec::Seq(a), TreeVec::Seq(b)) => {
                a.len() == b.len() && zip(a, b).all(|(x, y)| x.same_structure(y))
            }
            (TreeVec::Map(a), TreeVec::Map(b)) => {
                a.len() == b.len()
                    && zip(a, b).all(|((ka, va), (kb, vb))| ka == kb && va.same_structure(vb))
            }
            _ => false,
        }
    }

    fn zeros_like(&self) -> Self {
        match self {
            TreeVec::Leaf(v) => TreeVec::Leaf(vec![T::zero(); v.len()]),
            TreeVec::Seq(items) => TreeVec::Seq(items.iter().map(|t| t.zeros_like()).collect()),
            TreeVec::Map(entries) => TreeVec::Map(
                entries
                    .iter()
                    .map(|(k, t)| (k.clone(), t.zeros_like()))
                    .collect(),
            ),
        }
    }

    fn negate(&mut self) {
        match self {
            TreeVec::Leaf(v) => {
                v.as_mut_slice().negate();
            }
            TreeVec::Seq(items) => items.iter_mut().for_each(|t| t.negate()),
            TreeVec::Map(entries) => entries.values_mut().for_each(|t| t.negate()),
        }
    }

    fn scale(&mut self, c: T) {
        match self {
            TreeVec::Leaf(v) => {
                v.as_mut_slice().scale(c);
            }
            TreeVec::Seq(items) => items.iter_mut().for_each(|t| t.scale(c)),
            TreeVec::Map(entries) => entries.values_mut().for_each(|t| t.scale(c)),
        }
    }

    fn axpby(&mut self, a: T, x: &Self, b: T) {
        match (self, x) {
            (TreeVec::Leaf(v), TreeVec::Leaf(xv)) => {
                v.as_mut_slice().axpby(a, xv, b);
            }
            (TreeVec::Seq(items), TreeVec::Seq(xs)) => {
                assert_eq!(items.len(), xs.len());
                zip(items, xs).for_each(|(t, x)| t.axpby(a, x, b));
            }
            (TreeVec::Map(entries), TreeVec::Map(xs)) => {
                assert_eq!(entries.len(), xs.len());
                for ((k, t), (kx, x)) in zip(entries, xs) {
                    assert_eq!(k, kx);
                    t.axpby(a, x, b);
                }
            }
            _ => panic!("mismatched tree structures"),
        }
    }

    fn dot(&self, y: &Self) -> T {
        match (self, y) {
            (TreeVec::Leaf(a), TreeVec::Leaf(b)) => a.as_slice().dot(b),
            (TreeVec::Seq(a), TreeVec::Seq(b)) => {
                assert_eq!(a.len(), b.len());
                zip(a, b).fold(T::zero(), |acc, (x, y)| acc + x.dot(y))
            }
            (TreeVec::Map(a), TreeVec::Map(b)) => {
                assert_eq!(a.len(), b.len());
                zip(a, b).fold(T::zero(), |acc, ((ka, va), (kb, vb))| {
                    assert_eq!(ka, kb);
                    acc + va.dot(vb)
                })
            }
            _ => panic!("mismatched tree structures"),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::algebra::*;

    fn test_tree() -> TreeVec<f64> {
        TreeVec::map([
            ("w", TreeVec::leaf(vec![1., 2.])),
            ("z", TreeVec::seq(vec![TreeVec::leaf(vec![3.]), TreeVec::leaf(vec![4., 5.])])),
        ])
    }

    #[test]
    fn test_treevec_dims() {
        let t = test_tree();
        assert_eq!(t.dim(), 5);

        let z = t.zeros_like();
        assert!(z.same_structure(&t));
        assert_eq!(z.dim(), 5);
        assert_eq!(z.norm(), 0.);
    }

    #[test]
    fn test_treevec_math() {
        let t = test_tree();
        let mut s = t.zeros_like();

        // s = 2*t
        s.axpby(2., &t, 1.);
        assert_eq!(s.dot(&t), 2. * (1. + 4. + 9. + 16. + 25.));

        let d = s.sub(&t);
        assert_eq!(d, t);

        let mut n = t.clone();
        n.negate();
        assert_eq!(n.add(&t).norm(), 0.);
    }

    #[test]
    fn test_treevec_structure() {
        let t = test_tree();

        // same keys, different leaf length
        let q = TreeVec::map([
            ("w", TreeVec::leaf(vec![1.])),
            ("z", TreeVec::seq(vec![TreeVec::leaf(vec![3.]), TreeVec::leaf(vec![4., 5.])])),
        ]);
        assert!(!t.same_structure(&q));

        // different keys, same shapes
        let r = TreeVec::map([
            ("a", TreeVec::leaf(vec![1., 2.])),
            ("z", TreeVec::seq(vec![TreeVec::leaf(vec![3.]), TreeVec::leaf(vec![4., 5.])])),
        ]);
        assert!(!t.same_structure(&r));
    }

    #[test]
    #[should_panic]
    fn test_treevec_mismatch_panics() {
        let t = test_tree();
        let mut u = TreeVec::leaf(vec![0.; 5]);
        u.axpby(1., &t, 0.);
    }
}
