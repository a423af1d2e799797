#![allow(non_snake_case)]

use crate::algebra::{Adjoint, FloatT, MatrixShape, ShapedMatrix, SparseFormatError};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```no_run
/// use sella::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// This field should have length `n+1`. The last entry corresponds
    /// to the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Responsibility for ensuring these conditions hold
    /// is left to the caller.
    ///

    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    pub fn spalloc(m: usize, n: usize, nnz: usize) -> Self {
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// An `m` x `n` matrix of zeros, with no structural entries.
    ///
    /// To express a problem with no equality constraints, use a
    /// constraint matrix with zero rows
    /// ```no_run
    /// use sella::algebra::CscMatrix;
    /// let A : CscMatrix<f64> = CscMatrix::zeros((0, 3));
    /// ```
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        CscMatrix::spalloc(m, n, 0)
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let colptr = (0usize..=n).collect();
        let rowval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CscMatrix::new(n, n, colptr, rowval, nzval)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// transpose
    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowOrdering);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }
}

impl<'a, I, J, T> From<I> for CscMatrix<T>
where
    I: IntoIterator<Item = J>,
    J: IntoIterator<Item = &'a T>,
    T: FloatT,
{
    // build from an iterator over rows, with the rows themselves
    // iterators over floats.  All rows must be the same length.
    fn from(rows: I) -> CscMatrix<T> {
        let rows: Vec<Vec<T>> = rows
            .into_iter()
            .map(|r| r.into_iter().copied().collect())
            .collect();

        let m = rows.len();
        let n = rows.first().map_or(0, |r| r.len());
        assert!(rows.iter().all(|r| r.len() == n));

        let nnz = rows.iter().flatten().filter(|&&v| v != T::zero()).count();

        let mut colptr = Vec::with_capacity(n + 1);
        let mut rowval = Vec::with_capacity(nnz);
        let mut nzval = Vec::with_capacity(nnz);

        colptr.push(0);
        for col in 0..n {
            for (row, values) in rows.iter().enumerate() {
                let v = values[col];
                if v != T::zero() {
                    rowval.push(row);
                    nzval.push(v);
                }
            }
            colptr.push(nzval.len());
        }

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
    fn is_square(&self) -> bool {
        self.m == self.n
    }
}

#[test]
fn test_csc_from_rows() {
    // A =
    //[1.  3.  5.]
    //[2.  0.  6.]
    //[0.  4.  7.]
    let A = CscMatrix::from(&[
        [1., 3., 5.], //
        [2., 0., 6.],
        [0., 4., 7.],
    ]);

    let B = CscMatrix::new(
        3,                                // m
        3,                                // n
        vec![0, 2, 4, 7],                 //colptr
        vec![0, 1, 0, 2, 0, 1, 2],        //rowval
        vec![1., 2., 3., 4., 5., 6., 7.], //nzval
    );

    assert_eq!(A, B);
    assert!(A.check_format().is_ok());
}

#[test]
fn test_csc_check_format() {
    let mut A: CscMatrix<f64> = CscMatrix::identity(3);
    assert!(A.check_format().is_ok());

    // row index out of bounds
    A.rowval[2] = 3;
    assert!(matches!(
        A.check_format(),
        Err(SparseFormatError::BadRowval)
    ));

    // defective column pointers
    let mut B: CscMatrix<f64> = CscMatrix::identity(3);
    B.colptr[1] = 2;
    B.colptr[2] = 1;
    assert!(matches!(
        B.check_format(),
        Err(SparseFormatError::BadColptr)
    ));

    // rows out of order within a column
    let C = CscMatrix::new(
        3,
        1,
        vec![0, 3],
        vec![0, 2, 1], //unsorted
        vec![1., 2., 3.],
    );
    assert!(matches!(
        C.check_format(),
        Err(SparseFormatError::BadRowOrdering)
    ));

    // length mismatch between data fields
    let mut D: CscMatrix<f64> = CscMatrix::identity(2);
    D.nzval.pop();
    assert!(matches!(
        D.check_format(),
        Err(SparseFormatError::IncompatibleDimension)
    ));
}
