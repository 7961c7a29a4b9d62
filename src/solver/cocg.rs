//! Conjugate-orthogonal conjugate gradient (COCG).
//!
//! The complex-symmetric analogue of preconditioned CG: A = Aᵗ lets the
//! short recurrence survive if every orthogonality test uses the bilinear
//! (unconjugated) inner product instead of the Hermitian one.

use log::{debug, info};

use crate::equation::Equation;
use crate::error::Error;
use crate::preconditioner::{BlockJacobi, Preconditioner};
use crate::smoothing::{SmoothingKind, SmoothingStrategy};
use crate::solver::IterativeSolver;
use crate::utils::convergence::{Convergence, SolveStats};

pub struct CocgSolver {
    conv: Convergence<f64>,
    smoothing: Box<dyn SmoothingStrategy>,
    parallelism: usize,
    monitor: Option<Box<dyn FnMut(usize, f64, f64)>>,
}

impl CocgSolver {
    pub fn new(tol: f64, max_iters: usize) -> Self {
        Self {
            conv: Convergence::new(tol, max_iters),
            smoothing: SmoothingKind::None.build(),
            parallelism: 1,
            monitor: None,
        }
    }

    pub fn with_smoothing(mut self, kind: SmoothingKind) -> Self {
        self.smoothing = kind.build();
        self
    }

    /// Worker count for the matrix and vector kernels; 0 means all cores.
    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = workers;
        self
    }

    /// Per-iteration progress callback: (iteration, raw relative residual,
    /// smoothed relative residual).
    pub fn with_monitor<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize, f64, f64) + 'static,
    {
        self.monitor = Some(Box::new(f));
        self
    }
}

impl IterativeSolver for CocgSolver {
    fn solve(&mut self, equation: &mut Equation) -> Result<SolveStats<f64>, Error> {
        let workers = self.parallelism;
        equation.matrix.set_parallelism(workers);
        equation.solution.set_parallelism(workers);
        equation.right_side.set_parallelism(workers);

        let mut pc = BlockJacobi::from_matrix(&equation.matrix)?;
        pc.set_parallelism(workers);

        let Equation { matrix, solution, right_side } = &mut *equation;

        let mut r = right_side.scratch();
        let mut z = right_side.scratch();
        let mut r_next = right_side.scratch();
        let mut z_next = right_side.scratch();
        let mut p_next = right_side.scratch();
        let mut ap = right_side.scratch();

        matrix.multiply_into(solution, &mut ap)?;
        right_side.sub_into(&ap, &mut r)?;
        pc.apply_into(&r, &mut z)?;
        let mut p = z.clone();

        let r0_norm = r.norm();
        let f_norm = right_side.norm();
        self.smoothing.initialize(solution, &r);

        let mut iterations = 0;
        let mut i = 1;
        while self.conv.keep_iterating(r.norm() / f_norm, i) {
            iterations = i;

            let rz = r.bilinear_dot(&z)?;
            matrix.multiply_into(&p, &mut ap)?;
            let alpha = rz / ap.bilinear_dot(&p)?;

            solution.axpy(alpha, &p)?;
            r.axpy_into(-alpha, &ap, &mut r_next)?;
            pc.apply_into(&r_next, &mut z_next)?;

            let beta = r_next.bilinear_dot(&z_next)? / rz;
            z_next.axpy_into(beta, &p, &mut p_next)?;

            self.smoothing.apply(solution, &r_next)?;
            let raw_rel = r_next.norm() / f_norm;
            let smoothed_rel = self.smoothing.residual().norm() / f_norm;

            if let Some(monitor) = self.monitor.as_mut() {
                monitor(i, raw_rel, smoothed_rel);
            }
            if i % 50 == 0 {
                debug!("[cocg:{i}] {raw_rel:e} | {smoothed_rel:e} / {:e}", self.conv.tol);
            }

            std::mem::swap(&mut r, &mut r_next);
            std::mem::swap(&mut z, &mut z_next);
            std::mem::swap(&mut p, &mut p_next);

            i += 1;
            if self.conv.reached(smoothed_rel) {
                // The smoothed pair wins only once it meets the tolerance;
                // until then the raw recurrence keeps its own state.
                solution.copy_from(self.smoothing.solution())?;
                r.copy_from(self.smoothing.residual())?;
                break;
            }
        }

        let converged = self.conv.reached(r.norm() / f_norm);

        matrix.multiply_into(solution, &mut ap)?;
        right_side.sub_into(&ap, &mut r_next)?;
        let discrepancy = if r0_norm == 0.0 { 0.0 } else { r_next.norm() / r0_norm };
        info!("cocg finished after {iterations} iterations, discrepancy {discrepancy:e}");

        Ok(SolveStats {
            iterations,
            final_residual: r.norm() / f_norm,
            discrepancy,
            converged,
        })
    }
}
