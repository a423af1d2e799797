use super::{KrylovResult, KrylovSolver};
use crate::algebra::{FloatT, TreeMath};

/// Conjugate gradient method.
///
/// Valid only for symmetric positive definite systems, e.g. the
/// objective block of a problem with no constraints.  Stores three
/// working vectors regardless of iteration count.  If a direction of
/// nonpositive curvature is encountered the solve stops and reports
/// its current iterate as unconverged.
#[derive(Debug, Clone, Default)]
pub struct ConjugateGradient;

impl<T: FloatT> KrylovSolver<T> for ConjugateGradient {
    fn name(&self) -> &'static str {
        "cg"
    }

    fn solve<V, M>(&self, matvec: M, rhs: &V, tol: T, max_iter: u32) -> KrylovResult<V, T>
    where
        V: TreeMath<T = T>,
        M: Fn(&V) -> V,
    {
        let mut x = rhs.zeros_like();
        let bnorm = rhs.norm();

        if bnorm == T::zero() {
            return KrylovResult {
                x,
                iterations: 0,
                relres: T::zero(),
                converged: true,
            };
        }

        // x = 0 start, so r = p = rhs
        let mut r = rhs.clone();
        let mut p = rhs.clone();
        let mut rs = r.dot(&r);

        let mut iterations = 0u32;
        let mut relres = T::sqrt(rs) / bnorm;
        let mut converged = relres <= tol;

        while !converged && iterations < max_iter {
            let ap = matvec(&p);
            iterations += 1;

            let pap = p.dot(&ap);
            if pap <= T::zero() {
                // nonpositive curvature: system is not positive definite
                break;
            }
            let α = rs / pap;
            x.axpby(α, &p, T::one());
            r.axpby(-α, &ap, T::one());

            let rs_new = r.dot(&r);
            relres = T::sqrt(rs_new) / bnorm;
            if relres <= tol {
                converged = true;
            } else {
                let β = rs_new / rs;
                // p = r + β*p
                p.axpby(T::one(), &r, β);
            }
            rs = rs_new;
        }

        KrylovResult {
            x,
            iterations,
            relres,
            converged,
        }
    }
}
