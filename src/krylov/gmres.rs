use super::{KrylovResult, KrylovSolver};
use crate::algebra::{FloatT, TreeMath};
use std::iter::zip;

/// Restarted GMRES.
///
/// Builds an orthonormal Krylov basis by Arnoldi iteration with modified
/// Gram-Schmidt, solving the projected least squares problem on the fly
/// with Givens rotations.  The basis is discarded and rebuilt every
/// `restart` steps, which bounds storage at `restart + 1` basis vectors.
///
/// GMRES makes no symmetry or definiteness assumptions, so it is the
/// default method for the indefinite KKT operator.
#[derive(Debug, Clone)]
pub struct Gmres {
    /// number of Arnoldi steps between restarts
    pub restart: u32,
}

impl Gmres {
    /// GMRES with the given restart window
    pub fn new(restart: u32) -> Self {
        Self { restart }
    }
}

impl Default for Gmres {
    fn default() -> Self {
        Self { restart: 20 }
    }
}

impl<T: FloatT> KrylovSolver<T> for Gmres {
    fn name(&self) -> &'static str {
        "gmres"
    }

    fn solve<V, M>(&self, matvec: M, rhs: &V, tol: T, max_iter: u32) -> KrylovResult<V, T>
    where
        V: TreeMath<T = T>,
        M: Fn(&V) -> V,
    {
        let restart = self.restart.max(1) as usize;
        let mut x = rhs.zeros_like();
        let bnorm = rhs.norm();

        // zero right hand side: x = 0 is exact
        if bnorm == T::zero() {
            return KrylovResult {
                x,
                iterations: 0,
                relres: T::zero(),
                converged: true,
            };
        }

        let mut iterations = 0u32;
        let mut relres;
        let mut converged = false;

        loop {
            // true residual for the current iterate.  Free on the first
            // cycle where x = 0, costs one matvec after each restart.
            let mut r = rhs.clone();
            if iterations > 0 {
                let ax = matvec(&x);
                iterations += 1;
                r.axpby(-T::one(), &ax, T::one());
            }
            let β = r.norm();
            relres = β / bnorm;
            if relres <= tol {
                converged = true;
                break;
            }
            if iterations >= max_iter {
                break;
            }

            // Arnoldi loop.  `basis` holds the orthonormal Krylov vectors,
            // `hcols` the rotated Hessenberg columns (the R factor) and
            // `g` the rotated residual.
            let mut basis: Vec<V> = Vec::with_capacity(restart + 1);
            r.scale(β.recip());
            basis.push(r);

            let mut hcols: Vec<Vec<T>> = Vec::with_capacity(restart);
            let mut cs: Vec<T> = Vec::with_capacity(restart);
            let mut sn: Vec<T> = Vec::with_capacity(restart);
            let mut g = vec![T::zero(); restart + 1];
            g[0] = β;

            let mut k = 0;
            while k < restart && iterations < max_iter {
                let mut w = matvec(&basis[k]);
                iterations += 1;

                // orthogonalize against the current basis
                let mut h = vec![T::zero(); k + 2];
                for (i, v) in basis.iter().enumerate() {
                    h[i] = w.dot(v);
                    w.axpby(-h[i], v, T::one());
                }
                let hlast = w.norm();
                h[k + 1] = hlast;

                // an all zero column cannot reduce the residual.  Bail out
                // and let the restart recompute the true residual.
                if h.iter().all(|&hi| hi == T::zero()) {
                    break;
                }

                // apply the accumulated rotations to the new column
                for (i, (&c, &s)) in zip(&cs, &sn).enumerate() {
                    let t = c * h[i] + s * h[i + 1];
                    h[i + 1] = -s * h[i] + c * h[i + 1];
                    h[i] = t;
                }

                // new rotation zeroing the subdiagonal entry
                let (c, s) = _givens(h[k], h[k + 1]);
                h[k] = c * h[k] + s * h[k + 1];
                h[k + 1] = T::zero();
                g[k + 1] = -s * g[k];
                g[k] = c * g[k];
                cs.push(c);
                sn.push(s);
                hcols.push(h);
                k += 1;

                relres = T::abs(g[k]) / bnorm;
                if relres <= tol {
                    converged = true;
                    break;
                }
                // invariant subspace, no further expansion possible
                if hlast == T::zero() {
                    break;
                }
                w.scale(hlast.recip());
                basis.push(w);
            }

            // back substitution through the R factor, then x += basis*y
            let mut y = vec![T::zero(); k];
            for i in (0..k).rev() {
                let mut s = g[i];
                for j in (i + 1)..k {
                    s -= hcols[j][i] * y[j];
                }
                let d = hcols[i][i];
                // rank deficient least squares block: leave this component at zero
                y[i] = if d == T::zero() { T::zero() } else { s / d };
            }
            for (v, &yi) in zip(&basis, &y) {
                x.axpby(yi, v, T::one());
            }

            if converged || iterations >= max_iter {
                break;
            }
        }

        KrylovResult {
            x,
            iterations,
            relres,
            converged,
        }
    }
}

// plane rotation sending (a,b) to (r,0)
fn _givens<T: FloatT>(a: T, b: T) -> (T, T) {
    if b == T::zero() {
        (T::one(), T::zero())
    } else if T::abs(b) > T::abs(a) {
        let t = a / b;
        let s = T::one() / T::sqrt(T::one() + t * t);
        (s * t, s)
    } else {
        let t = b / a;
        let c = T::one() / T::sqrt(T::one() + t * t);
        (c, c * t)
    }
}

#[cfg(test)]
mod test {
    use crate::algebra::*;
    use crate::krylov::*;

    fn matvec_2x2(x: &Vec<f64>) -> Vec<f64> {
        // M = [3. 1.]
        //     [0. 2.]
        vec![3. * x[0] + x[1], 2. * x[1]]
    }

    #[test]
    fn test_gmres_nonsymmetric() {
        let rhs = vec![5., 4.];
        let out = Gmres::default().solve(matvec_2x2, &rhs, 1e-12, 50);
        assert!(out.converged);
        assert!(out.x.as_slice().dist(&[1., 2.]) <= 1e-8);
        assert!(out.relres <= 1e-12);
    }

    #[test]
    fn test_gmres_indefinite() {
        // symmetric indefinite, like a KKT matrix
        // M = [2. 1.]
        //     [1. 0.]
        let matvec = |x: &Vec<f64>| vec![2. * x[0] + x[1], x[0]];
        let rhs = vec![1., 1.];
        let out = Gmres::default().solve(matvec, &rhs, 1e-12, 50);
        assert!(out.converged);
        assert!(out.x.as_slice().dist(&[1., -1.]) <= 1e-8);
    }

    #[test]
    fn test_gmres_identity() {
        let matvec = |x: &Vec<f64>| x.clone();
        let rhs = vec![1., 2., 3.];
        let out = Gmres::default().solve(matvec, &rhs, 1e-12, 10);
        assert!(out.converged);
        assert_eq!(out.iterations, 1);
        assert!(out.x.as_slice().dist(&rhs) <= 1e-12);
    }

    #[test]
    fn test_gmres_restarting() {
        // tridiagonal system solved with a window of only 2 Krylov vectors
        let matvec = |x: &Vec<f64>| {
            let n = x.len();
            let mut y = vec![0.; n];
            for i in 0..n {
                y[i] = 4. * x[i];
                if i > 0 {
                    y[i] += x[i - 1];
                }
                if i + 1 < n {
                    y[i] += x[i + 1];
                }
            }
            y
        };
        let rhs = vec![1., 0., 0., 1.];
        let out = Gmres::new(2).solve(matvec, &rhs, 1e-10, 200);
        assert!(out.converged);

        // check the residual directly
        let r = rhs.sub(&matvec(&out.x));
        assert!(r.norm() <= 1e-9 * rhs.norm());
    }

    #[test]
    fn test_gmres_iteration_budget() {
        // 8 distinct eigenvalues cannot be resolved in 3 matvecs
        let matvec = |x: &Vec<f64>| {
            x.iter()
                .enumerate()
                .map(|(i, v)| (i + 1) as f64 * v)
                .collect()
        };
        let rhs = vec![1.; 8];
        let out = Gmres::default().solve(matvec, &rhs, 1e-14, 3);
        assert!(!out.converged);
        assert_eq!(out.iterations, 3);
        assert!(out.relres > 1e-14);
    }

    #[test]
    fn test_gmres_zero_rhs() {
        let matvec = |x: &Vec<f64>| x.clone();
        let rhs = vec![0.; 4];
        let out = Gmres::default().solve(matvec, &rhs, 1e-10, 10);
        assert!(out.converged);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.x, vec![0.; 4]);
    }
}
