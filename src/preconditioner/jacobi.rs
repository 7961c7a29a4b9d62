//! Jacobi (block-diagonal) preconditioner.

use crate::error::Error;
use crate::matrix::{BlockMatrix, ComplexValue};
use crate::preconditioner::Preconditioner;
use crate::vector::ComplexVector;

/// M⁻¹ = D⁻¹, stored as a diagonal-only [`BlockMatrix`] whose blocks are the
/// multiplicative inverses of the source diagonal: a real block a inverts to
/// 1/a, a complex block (a, b) to (a, −b)/(a² + b²). Applying it is a pure
/// elementwise scaling.
///
/// Singular diagonal blocks are not detected; inverting one yields
/// non-finite entries the caller is responsible for avoiding.
pub struct BlockJacobi {
    inverse_diagonal: BlockMatrix,
}

impl BlockJacobi {
    pub fn from_matrix(matrix: &BlockMatrix) -> Result<Self, Error> {
        let n = matrix.size();
        let index = matrix.diagonal_index().to_vec();
        let mut inverse = vec![0.0; matrix.diagonal().len()];

        for i in 0..n {
            let block = matrix.block(i, i)?;
            let value = ComplexValue::from_block(block);
            let det = value.real() * value.real() + value.imaginary() * value.imaginary();
            let offset = index[i];
            inverse[offset] = value.real() / det;
            if block.len() == 2 {
                inverse[offset + 1] = -value.imaginary() / det;
            }
        }

        let inverse_diagonal = BlockMatrix::new(
            inverse,
            Vec::new(),
            index,
            Vec::new(),
            vec![0; n + 1],
            Vec::new(),
        )?;
        Ok(Self { inverse_diagonal })
    }

    pub fn set_parallelism(&mut self, workers: usize) {
        self.inverse_diagonal.set_parallelism(workers);
    }
}

impl Preconditioner for BlockJacobi {
    fn apply_into(&self, r: &ComplexVector, z: &mut ComplexVector) -> Result<(), Error> {
        self.inverse_diagonal.multiply_into(r, z)
    }
}
