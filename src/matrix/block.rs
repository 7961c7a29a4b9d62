//! Block-sparse storage for complex-symmetric matrices (A = Aᵗ, not Aᴴ).
//!
//! Only the diagonal and the lower-triangular off-diagonal blocks are
//! stored; symmetry supplies the upper triangle. Each block is 1 double
//! (purely real) or 2 doubles (real, imag). The layout:
//!
//! - `diagonal` / `diagonal_index`: flat diagonal block values; block i
//!   occupies `diagonal_index[i]..diagonal_index[i+1]`.
//! - `off_diagonal` / `off_diagonal_index`: flat off-diagonal block values,
//!   indexed the same way by flat adjacency position.
//! - `row_index` (N+1) / `column_index`: row i's adjacency entries live at
//!   `row_index[i]..row_index[i+1]` in `column_index`, every stored column
//!   strictly below its row.

use crate::error::Error;
use crate::parallel;
use crate::vector::ComplexVector;

#[derive(Debug, Clone)]
pub struct BlockMatrix {
    diagonal: Vec<f64>,
    diagonal_index: Vec<usize>,
    off_diagonal: Vec<f64>,
    off_diagonal_index: Vec<usize>,
    row_index: Vec<usize>,
    column_index: Vec<usize>,
    parallelism: usize,
}

impl BlockMatrix {
    pub fn new(
        diagonal: Vec<f64>,
        off_diagonal: Vec<f64>,
        diagonal_index: Vec<usize>,
        off_diagonal_index: Vec<usize>,
        row_index: Vec<usize>,
        column_index: Vec<usize>,
    ) -> Result<Self, Error> {
        let matrix = Self {
            diagonal,
            diagonal_index,
            off_diagonal,
            off_diagonal_index,
            row_index,
            column_index,
            parallelism: 1,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// The 0×0 matrix.
    pub fn none() -> Self {
        Self {
            diagonal: Vec::new(),
            diagonal_index: Vec::new(),
            off_diagonal: Vec::new(),
            off_diagonal_index: Vec::new(),
            row_index: Vec::new(),
            column_index: Vec::new(),
            parallelism: 1,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        let n = self.size();
        if n == 0 {
            return Ok(());
        }
        check_offsets(&self.diagonal_index, self.diagonal.len())?;
        if self.row_index.len() != n + 1 {
            return Err(Error::InvalidStructure("row index must have size + 1 entries"));
        }
        let adjacency = *self.row_index.last().unwrap_or(&0);
        if self.column_index.len() != adjacency {
            return Err(Error::InvalidStructure("column index shorter than adjacency count"));
        }
        if adjacency > 0 {
            if self.off_diagonal_index.len() != adjacency + 1 {
                return Err(Error::InvalidStructure(
                    "off-diagonal index must have one offset per adjacency entry plus one",
                ));
            }
            check_offsets(&self.off_diagonal_index, self.off_diagonal.len())?;
        }
        if self.row_index.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidStructure("row index must be non-decreasing"));
        }
        for i in 0..n {
            for j in self.row_index[i]..self.row_index[i + 1] {
                if self.column_index[j] >= i {
                    return Err(Error::InvalidStructure(
                        "stored columns must lie strictly below their row",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Number of block rows.
    pub fn size(&self) -> usize {
        self.diagonal_index.len().saturating_sub(1)
    }

    /// Length of a compatible vector (two doubles per block row).
    pub fn dimension(&self) -> usize {
        self.size() * 2
    }

    pub fn set_parallelism(&mut self, workers: usize) {
        self.parallelism = workers;
    }

    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = workers;
        self
    }

    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    pub fn diagonal_index(&self) -> &[usize] {
        &self.diagonal_index
    }

    /// Stored block at (i, j). Access is symmetric: (i, j) and (j, i)
    /// resolve to the same block. Structurally absent pairs are an error.
    pub fn block(&self, i: usize, j: usize) -> Result<&[f64], Error> {
        let n = self.size();
        if i >= n || j >= n {
            return Err(Error::BlockNotPresent { row: i, col: j });
        }
        if i == j {
            return Ok(&self.diagonal[self.diagonal_index[i]..self.diagonal_index[i + 1]]);
        }
        let (row, col) = if i > j { (i, j) } else { (j, i) };
        for flat in self.row_index[row]..self.row_index[row + 1] {
            if self.column_index[flat] == col {
                return Ok(self.off_diagonal_block(flat));
            }
        }
        Err(Error::BlockNotPresent { row: i, col: j })
    }

    fn off_diagonal_block(&self, flat: usize) -> &[f64] {
        &self.off_diagonal[self.off_diagonal_index[flat]..self.off_diagonal_index[flat + 1]]
    }

    /// y = A·x, allocating the result. The empty matrix yields an empty
    /// vector whatever the operand.
    pub fn multiply(&self, x: &ComplexVector) -> Result<ComplexVector, Error> {
        if self.size() == 0 {
            return Ok(ComplexVector::zeros(0));
        }
        let mut y = ComplexVector::zeros(self.dimension()).with_parallelism(self.parallelism);
        self.multiply_into(x, &mut y)?;
        Ok(y)
    }

    /// y = A·x into caller-supplied storage.
    ///
    /// An off-diagonal block at (i, k) contributes to both y-block i and
    /// y-block k, so concurrent workers accumulate into private full-length
    /// buffers which are then summed into `y` in worker order. The result is
    /// therefore independent of scheduling for a fixed worker count.
    pub fn multiply_into(&self, x: &ComplexVector, y: &mut ComplexVector) -> Result<(), Error> {
        let dim = self.dimension();
        if x.len() != dim {
            return Err(Error::DimensionMismatch { expected: dim, actual: x.len() });
        }
        if y.len() != dim {
            return Err(Error::DimensionMismatch { expected: dim, actual: y.len() });
        }
        y.nullify();
        let n = self.size();
        if n == 0 {
            return Ok(());
        }

        let workers = parallel::resolve_workers(self.parallelism).min(n);
        let xs = x.values();
        if workers <= 1 {
            self.accumulate_rows(0..n, xs, y.values_mut());
            return Ok(());
        }

        let locals = parallel::map_chunks(n, workers, |rows| {
            let mut buffer = vec![0.0; dim];
            self.accumulate_rows(rows, xs, &mut buffer);
            buffer
        });
        let ys = y.values_mut();
        for local in locals {
            for (out, v) in ys.iter_mut().zip(local) {
                *out += v;
            }
        }
        Ok(())
    }

    fn accumulate_rows(&self, rows: std::ops::Range<usize>, x: &[f64], y: &mut [f64]) {
        for i in rows {
            let diag = &self.diagonal[self.diagonal_index[i]..self.diagonal_index[i + 1]];
            let xi = [x[2 * i], x[2 * i + 1]];
            let (yi0, yi1) = block_multiply(diag, xi, (y[2 * i], y[2 * i + 1]));
            y[2 * i] = yi0;
            y[2 * i + 1] = yi1;

            for flat in self.row_index[i]..self.row_index[i + 1] {
                let k = self.column_index[flat];
                let block = self.off_diagonal_block(flat);
                let xk = [x[2 * k], x[2 * k + 1]];

                let (a, b) = block_multiply(block, xk, (y[2 * i], y[2 * i + 1]));
                y[2 * i] = a;
                y[2 * i + 1] = b;

                let (c, d) = block_multiply(block, xi, (y[2 * k], y[2 * k + 1]));
                y[2 * k] = c;
                y[2 * k + 1] = d;
            }
        }
    }
}

/// Accumulate block·x onto (y0, y1). A 1-wide block is a real scalar; a
/// 2-wide block (a0, a1) applies the full complex product.
fn block_multiply(block: &[f64], x: [f64; 2], y: (f64, f64)) -> (f64, f64) {
    let (mut y0, mut y1) = y;
    y0 += block[0] * x[0];
    y1 += block[0] * x[1];
    if block.len() == 2 {
        y0 -= block[1] * x[1];
        y1 += block[1] * x[0];
    }
    (y0, y1)
}

fn check_offsets(index: &[usize], flat_len: usize) -> Result<(), Error> {
    if index.first() != Some(&0) || index.last() != Some(&flat_len) {
        return Err(Error::InvalidStructure("block offsets must start at 0 and end at the value count"));
    }
    for w in index.windows(2) {
        let width = w[1].checked_sub(w[0]);
        if !matches!(width, Some(1) | Some(2)) {
            return Err(Error::InvalidStructure("block width must be 1 or 2"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // | (1, 2)  .       .    |
    // |  .     (3, 4)   .    |  with off-diagonal blocks (2,0)=1, (2,1)=(7,8)
    // | (1)    (7, 8)  (5)   |
    fn mixed_matrix() -> BlockMatrix {
        BlockMatrix::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1.0, 7.0, 8.0],
            vec![0, 2, 4, 5],
            vec![0, 1, 3],
            vec![0, 0, 0, 2],
            vec![0, 1],
        )
        .unwrap()
    }

    #[test]
    fn mixed_block_multiply_matches_hand_computation() {
        let matrix = mixed_matrix();
        let ones = ComplexVector::new(vec![1.0; 6]);
        let y = matrix.multiply(&ones).unwrap();
        let expected = [0.0, 4.0, -2.0, 22.0, 5.0, 21.0];
        for (got, want) in y.values().iter().zip(expected) {
            assert_abs_diff_eq!(got, &want, epsilon = 1e-14);
        }
    }

    #[test]
    fn diagonal_multiply_is_elementwise_complex_product() {
        let matrix = BlockMatrix::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![],
            vec![0, 2, 4, 5],
            vec![],
            vec![0, 0, 0, 0],
            vec![],
        )
        .unwrap();
        let ones = ComplexVector::new(vec![1.0; 6]);
        let y = matrix.multiply(&ones).unwrap();
        let expected = [-1.0, 3.0, -1.0, 7.0, 5.0, 5.0];
        for (got, want) in y.values().iter().zip(expected) {
            assert_abs_diff_eq!(got, &want, epsilon = 1e-14);
        }
    }

    #[test]
    fn empty_matrix_multiplies_to_empty_vector() {
        let matrix = BlockMatrix::none();
        let y = matrix.multiply(&ComplexVector::zeros(0)).unwrap();
        assert!(y.is_empty());
    }

    #[test]
    fn parallel_multiply_matches_sequential() {
        let matrix = mixed_matrix();
        let x = ComplexVector::new(vec![0.5, -1.0, 2.0, 0.25, -3.0, 1.5]);
        let seq = matrix.multiply(&x).unwrap();
        for workers in [2, 3, 8] {
            let par = matrix.clone().with_parallelism(workers).multiply(&x).unwrap();
            for (a, b) in seq.values().iter().zip(par.values()) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn block_access_is_symmetric_and_checked() {
        let matrix = mixed_matrix();
        assert_eq!(matrix.block(0, 0).unwrap(), &[1.0, 2.0]);
        assert_eq!(matrix.block(2, 1).unwrap(), &[7.0, 8.0]);
        assert_eq!(matrix.block(1, 2).unwrap(), &[7.0, 8.0]);
        assert_eq!(matrix.block(2, 0).unwrap(), &[1.0]);
        assert!(matches!(matrix.block(0, 1), Err(Error::BlockNotPresent { row: 0, col: 1 })));
        assert!(matrix.block(0, 5).is_err());
    }

    #[test]
    fn multiply_rejects_wrong_vector_length() {
        let matrix = mixed_matrix();
        let short = ComplexVector::zeros(4);
        assert!(matches!(
            matrix.multiply(&short),
            Err(Error::DimensionMismatch { expected: 6, actual: 4 })
        ));
    }

    #[test]
    fn constructor_rejects_broken_structure() {
        // column index not strictly below the row
        let err = BlockMatrix::new(
            vec![1.0, 2.0],
            vec![1.0],
            vec![0, 1, 2],
            vec![0, 1],
            vec![0, 0, 1],
            vec![1],
        );
        assert!(matches!(err, Err(Error::InvalidStructure(_))));

        // block wider than 2
        let err = BlockMatrix::new(vec![1.0, 2.0, 3.0], vec![], vec![0, 3], vec![], vec![0, 0], vec![]);
        assert!(matches!(err, Err(Error::InvalidStructure(_))));
    }
}
