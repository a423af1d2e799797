//! Core numeric types and linear algebra for the solver.
//!
//! Everything the solver moves through its Krylov iterations is either a
//! [`TreeMath`] value or a [`LinearOperator`] acting on such values.  A
//! concrete sparse matrix type ([`CscMatrix`]) and a nested value
//! container ([`TreeVec`]) are provided, but user defined types work the
//! same way through the same traits.

mod error_types;
pub use error_types::*;
mod floats;
pub use floats::*;
mod math_traits;
pub use math_traits::*;
mod types;
pub use types::*;
mod vecmath;

mod csc;
pub use csc::*;
mod operator;
pub use operator::*;
mod tree;
pub use tree::*;
