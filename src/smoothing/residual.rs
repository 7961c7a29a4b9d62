//! Minimal-residual smoothing.
//!
//! Given the previous smoothed pair (y, s) and the raw iterate (x, r), pick
//! η minimizing ‖(1−η)·s + η·r‖₂ over the segment [0, 1] and take the same
//! convex combination of solutions. Because the residual is affine in the
//! solution, the smoothed pair still satisfies s = f − A·y exactly.

use num_complex::Complex64;

use crate::error::Error;
use crate::smoothing::SmoothingStrategy;
use crate::vector::ComplexVector;

#[derive(Debug)]
pub struct ResidualSmoothing {
    solution: ComplexVector,
    residual: ComplexVector,
    direction: ComplexVector,
}

impl ResidualSmoothing {
    pub fn new() -> Self {
        Self {
            solution: ComplexVector::zeros(0),
            residual: ComplexVector::zeros(0),
            direction: ComplexVector::zeros(0),
        }
    }
}

impl Default for ResidualSmoothing {
    fn default() -> Self {
        Self::new()
    }
}

impl SmoothingStrategy for ResidualSmoothing {
    fn initialize(&mut self, solution: &ComplexVector, residual: &ComplexVector) {
        // Cloned so later iterate updates cannot alias the smoothed state.
        self.solution = solution.clone();
        self.residual = residual.clone();
        self.direction = residual.scratch();
    }

    fn apply(&mut self, solution: &ComplexVector, residual: &ComplexVector) -> Result<(), Error> {
        residual.sub_into(&self.residual, &mut self.direction)?;

        let numerator = self.residual.hermitian_dot(&self.direction)?.re;
        let denominator = self.direction.hermitian_dot(&self.direction)?.re;
        // A raw residual equal to the smoothed one leaves nothing to move
        // along; keep the current state instead of dividing 0 by 0.
        let eta = if denominator == 0.0 {
            0.0
        } else {
            (-numerator / denominator).clamp(0.0, 1.0)
        };

        let keep = Complex64::new(1.0 - eta, 0.0);
        let take = Complex64::new(eta, 0.0);

        self.solution.scale_assign(keep)?;
        self.solution.axpy(take, solution)?;
        self.residual.scale_assign(keep)?;
        self.residual.axpy(take, residual)?;
        Ok(())
    }

    fn solution(&self) -> &ComplexVector {
        &self.solution
    }

    fn residual(&self) -> &ComplexVector {
        &self.residual
    }
}
