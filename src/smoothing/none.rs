//! Pass-through strategy: the smoothed pair is the raw iterate.

use crate::error::Error;
use crate::smoothing::SmoothingStrategy;
use crate::vector::ComplexVector;

#[derive(Debug)]
pub struct NoSmoothing {
    solution: ComplexVector,
    residual: ComplexVector,
}

impl NoSmoothing {
    pub fn new() -> Self {
        Self { solution: ComplexVector::zeros(0), residual: ComplexVector::zeros(0) }
    }
}

impl Default for NoSmoothing {
    fn default() -> Self {
        Self::new()
    }
}

impl SmoothingStrategy for NoSmoothing {
    fn initialize(&mut self, solution: &ComplexVector, residual: &ComplexVector) {
        self.solution = solution.clone();
        self.residual = residual.clone();
    }

    fn apply(&mut self, solution: &ComplexVector, residual: &ComplexVector) -> Result<(), Error> {
        self.solution.copy_from(solution)?;
        self.residual.copy_from(residual)
    }

    fn solution(&self) -> &ComplexVector {
        &self.solution
    }

    fn residual(&self) -> &ComplexVector {
        &self.residual
    }
}
