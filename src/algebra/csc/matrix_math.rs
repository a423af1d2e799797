use crate::algebra::*;

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(self, y, x, a, b);
    }
}

impl<T: FloatT> MatrixVectorMultiply for Adjoint<'_, CscMatrix<T>> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_T(self.src, y, x, a, b);
    }
}

// sparse matrix-vector multiply, no transpose
#[allow(non_snake_case)]
fn _csc_axpby_N<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    //first do the b*y part
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == T::one() {
    } else if b == -T::one() {
        y.negate();
    } else {
        y.scale(b);
    }

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    assert_eq!(A.nzval.len(), *A.colptr.last().unwrap());
    assert_eq!(x.len(), A.n);

    //y += A*x
    if a == T::one() {
        for (j, xj) in x.iter().enumerate().take(A.n) {
            for i in A.colptr[j]..A.colptr[j + 1] {
                y[A.rowval[i]] += A.nzval[i] * *xj;
            }
        }
    } else if a == -T::one() {
        for (j, xj) in x.iter().enumerate().take(A.n) {
            for i in A.colptr[j]..A.colptr[j + 1] {
                y[A.rowval[i]] -= A.nzval[i] * *xj;
            }
        }
    } else {
        for (j, xj) in x.iter().enumerate().take(A.n) {
            for i in A.colptr[j]..A.colptr[j + 1] {
                y[A.rowval[i]] += a * A.nzval[i] * *xj;
            }
        }
    }
}

// sparse matrix-vector multiply, transposed
#[allow(non_snake_case)]
fn _csc_axpby_T<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    //first do the b*y part
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == T::one() {
    } else if b == -T::one() {
        y.negate();
    } else {
        y.scale(b);
    }

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    assert_eq!(A.nzval.len(), *A.colptr.last().unwrap());
    assert_eq!(x.len(), A.m);

    //y += A'*x
    if a == T::one() {
        for (j, yj) in y.iter_mut().enumerate().take(A.n) {
            for k in A.colptr[j]..A.colptr[j + 1] {
                *yj += A.nzval[k] * x[A.rowval[k]];
            }
        }
    } else if a == -T::one() {
        for (j, yj) in y.iter_mut().enumerate().take(A.n) {
            for k in A.colptr[j]..A.colptr[j + 1] {
                *yj -= A.nzval[k] * x[A.rowval[k]];
            }
        }
    } else {
        for (j, yj) in y.iter_mut().enumerate().take(A.n) {
            for k in A.colptr[j]..A.colptr[j + 1] {
                *yj += a * A.nzval[k] * x[A.rowval[k]];
            }
        }
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod test {
    use crate::algebra::*;

    fn test_matrix_3x3() -> CscMatrix<f64> {
        // A =
        //[1.  3.  5.]
        //[2.  0.  6.]
        //[0.  4.  7.]
        CscMatrix::from(&[
            [1., 3., 5.], //
            [2., 0., 6.],
            [0., 4., 7.],
        ])
    }

    #[test]
    fn test_gemv_N() {
        let A = test_matrix_3x3();
        let x = vec![1., -2., 3.];
        let mut y = vec![1., 1., 1.];

        // y = 2*A*x + y
        A.gemv(&mut y, &x, 2., 1.);
        assert_eq!(y, vec![21., 41., 27.]);

        // y = A*x
        A.gemv(&mut y, &x, 1., 0.);
        assert_eq!(y, vec![10., 20., 13.]);
    }

    #[test]
    fn test_gemv_T() {
        let A = test_matrix_3x3();
        let x = vec![1., -2., 3.];
        let mut y = vec![1., 1., 1.];

        // y = 2*A'*x + y
        A.t().gemv(&mut y, &x, 2., 1.);
        assert_eq!(y, vec![-5., 31., 29.]);

        // y = -A'*x
        A.t().gemv(&mut y, &x, -1., 0.);
        assert_eq!(y, vec![3., -15., -14.]);
    }

    #[test]
    fn test_gemv_empty() {
        // operators with no rows appear in unconstrained problems
        let A: CscMatrix<f64> = CscMatrix::zeros((0, 3));
        let x = vec![1., 2., 3.];
        let mut y: Vec<f64> = vec![];
        A.gemv(&mut y, &x, 1., 0.);
        assert!(y.is_empty());

        let mut z = vec![7.; 3];
        A.t().gemv(&mut z, &y, 1., 0.);
        assert_eq!(z, vec![0., 0., 0.]);
    }
}
