//! Preconditioners for the iterative solvers.

use crate::error::Error;
use crate::vector::ComplexVector;

/// A preconditioner M ≈ A⁻¹: z = M⁻¹ r.
pub trait Preconditioner {
    fn apply_into(&self, r: &ComplexVector, z: &mut ComplexVector) -> Result<(), Error>;
}

pub mod jacobi;

pub use jacobi::BlockJacobi;
