#![allow(non_snake_case)]
#![allow(clippy::type_complexity)]
use sella::{algebra::*, solver::*};

// a collection of tests to ensure that data of
// incompatible dimension won't be accepted

fn api_dim_check_data() -> (CscMatrix<f64>, Vec<f64>, CscMatrix<f64>, Vec<f64>) {
    let Q = CscMatrix::<f64>::spalloc(4, 4, 0);
    let c = vec![0.; 4];
    let A = CscMatrix::<f64>::spalloc(6, 4, 0);
    let b = vec![0.; 6];
    (Q, c, A, b)
}

#[test]
fn api_dim_check_working() {
    // This example should work because dimensions are
    // all compatible.  All following checks vary one
    // of these sizes to test dimension checks

    let (Q, c, A, b) = api_dim_check_data();

    let solver = EqualityConstrainedQP::new(SolverSettings::default());
    assert!(solver.solve(&Q, &c, &A, &b).is_ok());
}

#[test]
fn api_dim_check_Q_not_square() {
    let (_Q, c, A, b) = api_dim_check_data();
    let Q = CscMatrix::<f64>::spalloc(4, 3, 0);

    let solver = EqualityConstrainedQP::new(SolverSettings::default());
    let err = solver.solve(&Q, &c, &A, &b).unwrap_err();
    assert!(matches!(err, ShapeError::ObjectiveNotSquare { .. }));
}

#[test]
fn api_dim_check_bad_c() {
    let (Q, _c, A, b) = api_dim_check_data();
    let c = vec![0.; 3];

    let solver = EqualityConstrainedQP::new(SolverSettings::default());
    let err = solver.solve(&Q, &c, &A, &b).unwrap_err();
    assert!(matches!(err, ShapeError::ObjectiveMismatch { .. }));
}

#[test]
fn api_dim_check_bad_A_cols() {
    let (Q, c, _A, b) = api_dim_check_data();
    let A = CscMatrix::<f64>::spalloc(6, 3, 0);

    let solver = EqualityConstrainedQP::new(SolverSettings::default());
    let err = solver.solve(&Q, &c, &A, &b).unwrap_err();
    assert!(matches!(err, ShapeError::ConstraintColsMismatch { .. }));
}

#[test]
fn api_dim_check_bad_A_rows() {
    let (Q, c, _A, b) = api_dim_check_data();
    let A = CscMatrix::<f64>::spalloc(5, 4, 0);

    let solver = EqualityConstrainedQP::new(SolverSettings::default());
    let err = solver.solve(&Q, &c, &A, &b).unwrap_err();
    assert!(matches!(err, ShapeError::ConstraintRowsMismatch { .. }));
}
