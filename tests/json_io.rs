#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use sella::{algebra::*, solver::*};
    use std::io::{Seek, SeekFrom};

    let Q = CscMatrix {
        m: 2,
        n: 2,
        colptr: vec![0, 1, 2],
        rowval: vec![0, 1],
        nzval: vec![2.0, 2.0],
    };
    let c = [0.0, 0.0];
    let A = CscMatrix {
        m: 1,
        n: 2,
        colptr: vec![0, 1, 2],
        rowval: vec![0, 0],
        nzval: vec![1.0, 1.0],
    };
    let b = [1.0];

    let settings = SolverSettingsBuilder::default().build().unwrap();
    let data = JsonProblemData::new(&Q, &c, &A, &b, &settings);
    let solution = data.solve().unwrap();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file).unwrap();

    // read the problem from the file and replay the solve
    file.seek(SeekFrom::Start(0)).unwrap();
    let mut data2 = JsonProblemData::<f64>::read_from_file(&mut file).unwrap();
    let solution2 = data2.solve().unwrap();
    assert_eq!(solution.primal, solution2.primal);
    assert_eq!(solution.dual_eq, solution2.dual_eq);

    // replay with the iteration budget cut to one; the point cannot
    // reach feasibility and the reporter shows it
    data2.settings.max_iter = 1;
    let solution3 = data2.solve().unwrap();
    let solver = EqualityConstrainedQP::new(data2.settings.clone());
    let err =
        solver.l2_optimality_error(&data2.Q, &data2.c, &data2.A, &data2.b, &solution3.point());
    assert!(err > 1e-3);
}
