//! A linear system A·x = f bundled with its working solution vector.

use crate::error::Error;
use crate::matrix::BlockMatrix;
use crate::vector::ComplexVector;

/// (matrix, current solution, right-hand side). Solvers update `solution`
/// in place, iteration by iteration.
#[derive(Debug)]
pub struct Equation {
    pub matrix: BlockMatrix,
    pub solution: ComplexVector,
    pub right_side: ComplexVector,
}

impl Equation {
    pub fn new(
        matrix: BlockMatrix,
        solution: ComplexVector,
        right_side: ComplexVector,
    ) -> Result<Self, Error> {
        let dim = matrix.dimension();
        if solution.len() != dim {
            return Err(Error::DimensionMismatch { expected: dim, actual: solution.len() });
        }
        if right_side.len() != dim {
            return Err(Error::DimensionMismatch { expected: dim, actual: right_side.len() });
        }
        Ok(Self { matrix, solution, right_side })
    }
}
