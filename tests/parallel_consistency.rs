//! Worker-count invariance: the matvec and the solvers must produce the
//! same answers (up to floating-point summation order) whatever the degree
//! of parallelism.

use approx::assert_abs_diff_eq;
use cskrylov::{BlockMatrix, CocgSolver, ComplexVector, Equation, IterativeSolver, LosSolver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Block-tridiagonal complex-symmetric system with a dominant diagonal:
/// every block is complex (width 2), row i couples to row i−1.
fn tridiagonal_system(n: usize, seed: u64) -> (BlockMatrix, ComplexVector) {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut diagonal = Vec::with_capacity(2 * n);
    let mut diagonal_index = Vec::with_capacity(n + 1);
    for i in 0..n {
        diagonal_index.push(2 * i);
        diagonal.push(10.0 + rng.gen_range(-1.0..1.0));
        diagonal.push(rng.gen_range(-2.0..2.0));
    }
    diagonal_index.push(2 * n);

    let mut off_diagonal = Vec::with_capacity(2 * (n - 1));
    let mut off_diagonal_index = Vec::with_capacity(n);
    let mut row_index = Vec::with_capacity(n + 1);
    let mut column_index = Vec::with_capacity(n - 1);
    row_index.push(0);
    row_index.push(0);
    for i in 1..n {
        off_diagonal_index.push(2 * (i - 1));
        off_diagonal.push(rng.gen_range(-1.0..1.0));
        off_diagonal.push(rng.gen_range(-1.0..1.0));
        column_index.push(i - 1);
        row_index.push(i);
    }
    off_diagonal_index.push(2 * (n - 1));

    let matrix = BlockMatrix::new(
        diagonal,
        off_diagonal,
        diagonal_index,
        off_diagonal_index,
        row_index,
        column_index,
    )
    .unwrap();

    let rhs: Vec<f64> = (0..2 * n).map(|_| rng.gen_range(-5.0..5.0)).collect();
    (matrix, ComplexVector::new(rhs))
}

#[test]
fn matvec_is_invariant_across_worker_counts() {
    let (matrix, x) = tridiagonal_system(40, 42);
    let reference = matrix.multiply(&x).unwrap();
    let scale = reference.norm().max(1.0);
    for workers in [2, 3, 4, 8, 40] {
        let y = matrix.clone().with_parallelism(workers).multiply(&x).unwrap();
        for (a, b) in reference.values().iter().zip(y.values()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9 * scale);
        }
    }
}

#[test]
fn zero_workers_means_all_cores() {
    let (matrix, x) = tridiagonal_system(16, 7);
    let reference = matrix.multiply(&x).unwrap();
    let y = matrix.clone().with_parallelism(0).multiply(&x).unwrap();
    let scale = reference.norm().max(1.0);
    for (a, b) in reference.values().iter().zip(y.values()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-9 * scale);
    }
}

#[test]
fn parallel_cocg_solves_to_the_requested_tolerance() {
    let (matrix, rhs) = tridiagonal_system(40, 42);
    let f_norm = rhs.norm();
    let mut equation = Equation::new(matrix, ComplexVector::zeros(rhs.len()), rhs).unwrap();
    let mut solver = CocgSolver::new(1e-10, 1000).with_parallelism(4);
    let stats = solver.solve(&mut equation).unwrap();
    assert!(stats.converged, "cocg on the tridiagonal system: {stats:?}");

    let residual = equation
        .right_side
        .sub(&equation.matrix.multiply(&equation.solution).unwrap())
        .unwrap();
    assert!(residual.norm() / f_norm < 1e-8);
}

#[test]
fn parallel_and_sequential_los_agree() {
    let (matrix, rhs) = tridiagonal_system(40, 42);

    let mut seq = Equation::new(matrix.clone(), ComplexVector::zeros(rhs.len()), rhs.clone()).unwrap();
    let stats_seq = LosSolver::new(1e-10, 1000).solve(&mut seq).unwrap();
    assert!(stats_seq.converged);

    let mut par = Equation::new(matrix, ComplexVector::zeros(rhs.len()), rhs).unwrap();
    let stats_par = LosSolver::new(1e-10, 1000).with_parallelism(4).solve(&mut par).unwrap();
    assert!(stats_par.converged);

    for (a, b) in seq.solution.values().iter().zip(par.solution.values()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-8);
    }
}
