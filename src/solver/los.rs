//! Local optimal scheme (LOS).
//!
//! A three-term generalized conjugate-residual method for complex-symmetric
//! systems. Alongside the search direction p it carries an auxiliary
//! residual direction s and their matrix images z = A·p and a = A·s, plus
//! the preconditioned image w = M⁻¹z, so each iteration costs one
//! matrix-vector product and one preconditioner application.

use log::{debug, info};

use crate::equation::Equation;
use crate::error::Error;
use crate::preconditioner::{BlockJacobi, Preconditioner};
use crate::smoothing::{SmoothingKind, SmoothingStrategy};
use crate::solver::IterativeSolver;
use crate::utils::convergence::{Convergence, SolveStats};

pub struct LosSolver {
    conv: Convergence<f64>,
    smoothing: Box<dyn SmoothingStrategy>,
    parallelism: usize,
    monitor: Option<Box<dyn FnMut(usize, f64, f64)>>,
}

impl LosSolver {
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

impl IterativeSolver for LosSolver {
    fn solve(&mut self, equation: &mut Equation) -> Result<SolveStats<f64>, Error> {
        let workers = self.parallelism;
        equation.matrix.set_parallelism(workers);
        equation.solution.set_parallelism(workers);
        equation.right_side.set_parallelism(workers);

        let mut pc = BlockJacobi::from_matrix(&equation.matrix)?;
        pc.set_parallelism(workers);

        let Equation { matrix, solution, right_side } = &mut *equation;

        let mut r = right_side.scratch();
        let mut s = right_side.scratch();
        let mut a = right_side.scratch();
        let mut w = right_side.scratch();
        let mut buffer = right_side.scratch();

        matrix.multiply_into(solution, &mut buffer)?;
        right_side.sub_into(&buffer, &mut r)?;
        pc.apply_into(&r, &mut s)?;
        let mut p = s.clone();
        matrix.multiply_into(&p, &mut a)?;
        let mut z = a.clone();
        pc.apply_into(&z, &mut w)?;

        let r0_norm = r.norm();
        let f_norm = right_side.norm();
        self.smoothing.initialize(solution, &r);

        let mut iterations = 0;
        let mut i = 1;
        while self.conv.keep_iterating(r.norm() / f_norm, i) {
            iterations = i;

            let wz = w.bilinear_dot(&z)?;
            let alpha = w.bilinear_dot(&r)? / wz;

            solution.axpy(alpha, &p)?;
            r.axpy(-alpha, &z)?;
            s.axpy(-alpha, &w)?;
            matrix.multiply_into(&s, &mut a)?;

            let beta = -(w.bilinear_dot(&a)?) / wz;

            // Three-term updates in place: p = s + β·p, z = a + β·z.
            p.scale_assign(beta)?;
            p.add_assign(&s)?;
            z.scale_assign(beta)?;
            z.add_assign(&a)?;
            pc.apply_into(&z, &mut w)?;

            self.smoothing.apply(solution, &r)?;
            let raw_rel = r.norm() / f_norm;
            let smoothed_rel = self.smoothing.residual().norm() / f_norm;

            if let Some(monitor) = self.monitor.as_mut() {
                monitor(i, raw_rel, smoothed_rel);
            }
            if i % 50 == 0 {
                debug!("[los:{i}] {raw_rel:e} | {smoothed_rel:e} / {:e}", self.conv.tol);
            }

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

        matrix.multiply_into(solution, &mut buffer)?;
        right_side.sub_into(&buffer, &mut a)?;
        let discrepancy = if r0_norm == 0.0 { 0.0 } else { a.norm() / r0_norm };
        info!("los finished after {iterations} iterations, discrepancy {discrepancy:e}");

        Ok(SolveStats {
            iterations,
            final_residual: r.norm() / f_norm,
            discrepancy,
            converged,
        })
    }
}
