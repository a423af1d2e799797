#![allow(non_snake_case)]

use sella::{algebra::*, solver::*};

#[test]
fn test_matrix_free_matches_sparse() {
    // the same problem expressed with a sparse Q and with Q as a
    // closure must produce the same iterates
    let Q = CscMatrix::from(&[
        [2., 0.], //
        [0., 2.],
    ]);
    let c = vec![1., -1.];
    let A = CscMatrix::from(&[[1., 1.]]);
    let b = vec![1.];

    let solver = EqualityConstrainedQP::new(SolverSettings::default());
    let reference = solver.solve(&Q, &c, &A, &b).unwrap();

    let scale_by_two = |x: &Vec<f64>| x.iter().map(|&v| 2. * v).collect::<Vec<f64>>();
    let Qop = FunctionalOperator::new(scale_by_two, scale_by_two);
    let solution = solver.solve_with_operators(&Qop, &c, &A, &b);

    assert!(solution.primal.dist(&reference.primal) <= 1e-12);
    assert!(solution.dual_eq.dist(&reference.dual_eq) <= 1e-12);
}

#[test]
fn test_tree_structured_values() {
    // primal value split into two named blocks with different
    // curvature, coupled by one scalar constraint over all entries:
    //
    // minimize    0.5|u|^2 + |v|^2
    // subject to  u_1 + u_2 + v_1 = 3
    let ones = TreeVec::map([
        ("u", TreeVec::leaf(vec![1., 1.])),
        ("v", TreeVec::leaf(vec![1.])),
    ]);

    let apply_q = |p: &TreeVec<f64>| {
        let mut out = p.clone();
        if let TreeVec::Map(blocks) = &mut out {
            blocks.get_mut("v").unwrap().scale(2.);
        }
        out
    };
    let Qop = FunctionalOperator::new(apply_q, apply_q);

    // A sums every entry; its adjoint broadcasts back over the tree
    let Aop = FunctionalOperator::new(
        |p: &TreeVec<f64>| vec![p.dot(&ones)],
        |d: &Vec<f64>| {
            let mut out = ones.clone();
            out.scale(d[0]);
            out
        },
    );

    let c = ones.zeros_like();
    let b = vec![3.];

    let settings = SolverSettingsBuilder::default().tol(1e-9).build().unwrap();
    let solver = EqualityConstrainedQP::new(settings);
    let solution = solver.solve_with_operators(&Qop, &c, &Aop, &b);

    let expected = TreeVec::map([
        ("u", TreeVec::leaf(vec![1.2, 1.2])),
        ("v", TreeVec::leaf(vec![0.6])),
    ]);
    assert!(solution.primal.sub(&expected).norm() <= 1e-6);
    assert!(solution.dual_eq.dist(&[-1.2]) <= 1e-6);
}
