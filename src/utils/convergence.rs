//! Convergence tracking & tolerance checks for iterative solvers.

/// Stopping criteria: relative-residual tolerance and iteration cap.
#[derive(Debug, Clone, Copy)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

/// Outcome of a solve. `final_residual` is the relative residual the
/// recurrence last saw; `discrepancy` is the recomputed true residual norm
/// divided by the initial residual norm, reported as a diagnostic only.
#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub discrepancy: T,
    pub converged: bool,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { tol, max_iters }
    }

    /// True once the relative residual has dropped below tolerance.
    pub fn reached(&self, relative_residual: T) -> bool {
        relative_residual < self.tol
    }

    /// True while iteration `i` may still run. A non-finite residual fails
    /// the `>=` comparison and stops the loop.
    pub fn keep_iterating(&self, relative_residual: T, i: usize) -> bool {
        i < self.max_iters && relative_residual >= self.tol
    }
}
