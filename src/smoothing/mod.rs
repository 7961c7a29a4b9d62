//! Residual-smoothing strategies.
//!
//! Krylov recurrences for complex-symmetric systems produce oscillatory
//! residual histories; a smoothing strategy post-processes each iterate into
//! a secondary, better-behaved (solution, residual) pair that solvers use
//! for their stopping decision.

use crate::error::Error;
use crate::vector::ComplexVector;

pub trait SmoothingStrategy {
    /// Seed the smoothed state from the starting solution and residual.
    fn initialize(&mut self, solution: &ComplexVector, residual: &ComplexVector);

    /// Fold the current iterate into the smoothed state.
    fn apply(&mut self, solution: &ComplexVector, residual: &ComplexVector) -> Result<(), Error>;

    fn solution(&self) -> &ComplexVector;

    fn residual(&self) -> &ComplexVector;
}

pub mod none;
pub mod residual;

pub use none::NoSmoothing;
pub use residual::ResidualSmoothing;

/// Closed registry of the available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingKind {
    None,
    Residual,
}

impl SmoothingKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(SmoothingKind::None),
            "residual" => Some(SmoothingKind::Residual),
            _ => None,
        }
    }

    pub fn build(self) -> Box<dyn SmoothingStrategy> {
        match self {
            SmoothingKind::None => Box::new(NoSmoothing::new()),
            SmoothingKind::Residual => Box::new(ResidualSmoothing::new()),
        }
    }
}
