use crate::algebra::*;
use crate::solver::{EqualityConstrainedQP, KKTSolution, ShapeError, SolverSettings};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

// The user facing problem data in a single serializable bundle, so
// that a problem and the settings used to solve it can be captured
// to a file and replayed later.

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
pub struct JsonProblemData<T: FloatT> {
    pub Q: CscMatrix<T>,
    pub c: Vec<T>,
    pub A: CscMatrix<T>,
    pub b: Vec<T>,
    pub settings: SolverSettings<T>,
}

impl<T> JsonProblemData<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// bundle from borrowed problem data
    pub fn new(
        Q: &CscMatrix<T>,
        c: &[T],
        A: &CscMatrix<T>,
        b: &[T],
        settings: &SolverSettings<T>,
    ) -> Self {
        Self {
            Q: Q.clone(),
            c: c.to_vec(),
            A: A.clone(),
            b: b.to_vec(),
            settings: settings.clone(),
        }
    }

    /// solve the bundled problem with the bundled settings
    pub fn solve(&self) -> Result<KKTSolution<Vec<T>, Vec<T>>, ShapeError> {
        let solver = EqualityConstrainedQP::new(self.settings.clone());
        solver.solve(&self.Q, &self.c, &self.A, &self.b)
    }

    /// write the problem data to a file as JSON
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// read problem data back from a JSON file
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data = serde_json::from_str(&buffer)?;
        Ok(json_data)
    }
}

#[test]
fn test_json_io() {
    use std::io::{Seek, SeekFrom};

    let Q = CscMatrix::from(&[
        [2.0, 0.0], //
        [0.0, 2.0],
    ]);
    let c = [0.0, 0.0];
    let A = CscMatrix::from(&[[1.0, 1.0]]);
    let b = [1.0];
    let settings = SolverSettings::default();

    let data = JsonProblemData::new(&Q, &c, &A, &b, &settings);
    let solution = data.solve().unwrap();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file).unwrap();

    // read the problem from the file and replay it
    file.seek(SeekFrom::Start(0)).unwrap();
    let data2 = JsonProblemData::<f64>::read_from_file(&mut file).unwrap();
    let solution2 = data2.solve().unwrap();
    assert_eq!(solution.primal, solution2.primal);
    assert_eq!(solution.dual_eq, solution2.dual_eq);
}
