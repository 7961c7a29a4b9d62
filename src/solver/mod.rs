//! Iterative solvers for complex-symmetric block-sparse systems.

use crate::equation::Equation;
use crate::error::Error;
use crate::smoothing::SmoothingKind;
use crate::utils::convergence::{Convergence, SolveStats};

/// Common interface for the iterative solvers.
///
/// `solve` updates the equation's solution vector in place and reports
/// iteration stats. Running out of iterations is a normal outcome
/// (`converged: false`), not an error; callers judge the result by the
/// reported discrepancy.
pub trait IterativeSolver {
    fn solve(&mut self, equation: &mut Equation) -> Result<SolveStats<f64>, Error>;
}

pub mod cocg;
pub use cocg::CocgSolver;

pub mod los;
pub use los::LosSolver;

/// Closed registry of the available solvers; replaces lookup by runtime
/// type scanning with an explicit identifier-to-constructor mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    Cocg,
    Los,
}

impl SolverKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cocg" => Some(SolverKind::Cocg),
            "los" => Some(SolverKind::Los),
            _ => None,
        }
    }

    pub fn build(self, smoothing: SmoothingKind, conv: Convergence<f64>) -> Box<dyn IterativeSolver> {
        match self {
            SolverKind::Cocg => {
                Box::new(CocgSolver::new(conv.tol, conv.max_iters).with_smoothing(smoothing))
            }
            SolverKind::Los => {
                Box::new(LosSolver::new(conv.tol, conv.max_iters).with_smoothing(smoothing))
            }
        }
    }
}
