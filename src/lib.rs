//! cskrylov: iterative solvers for complex-symmetric block-sparse systems
//!
//! This crate provides the block-sparse storage, complex-vector kernels,
//! Jacobi preconditioning, residual smoothing and Krylov-type solvers (COCG
//! and LOS) needed to solve A·x = f where A is complex-symmetric (A = Aᵗ,
//! not Hermitian), as arises in discretized frequency-domain field problems.

pub mod parallel;

pub mod equation;
pub mod error;
pub mod matrix;
pub mod preconditioner;
pub mod smoothing;
pub mod solver;
pub mod utils;
pub mod vector;

// Re-exports for convenience
pub use equation::Equation;
pub use error::Error;
pub use matrix::{BlockMatrix, ComplexValue};
pub use preconditioner::{BlockJacobi, Preconditioner};
pub use smoothing::{NoSmoothing, ResidualSmoothing, SmoothingKind, SmoothingStrategy};
pub use solver::{CocgSolver, IterativeSolver, LosSolver, SolverKind};
pub use vector::ComplexVector;

// Re-export the solve report at the crate root for convenience
pub use utils::convergence::{Convergence, SolveStats};
