use thiserror::Error;

// Unified error type for cskrylov

#[derive(Error, Debug)]
pub enum Error {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("complex vector length {0} is odd")]
    OddLength(usize),
    #[error("no block stored at ({row}, {col})")]
    BlockNotPresent { row: usize, col: usize },
    #[error("invalid matrix structure: {0}")]
    InvalidStructure(&'static str),
}
