//! Dense complex vectors stored as interleaved re/im doubles.
//!
//! A vector of length 2N holds N complex numbers at positions (2i, 2i+1).
//! Arithmetic kernels can write into caller-supplied scratch vectors so
//! solver loops run without per-iteration allocation. A configurable degree
//! of parallelism steers the data-parallel kernels; reductions combine
//! per-chunk partial sums in chunk order, so results are deterministic for a
//! fixed worker count.

use num_complex::Complex64;

use crate::error::Error;
use crate::parallel;

#[derive(Debug, Clone)]
pub struct ComplexVector {
    values: Vec<f64>,
    parallelism: usize,
}

impl ComplexVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, parallelism: 1 }
    }

    /// Zero-filled vector of `len` doubles (len/2 complex entries).
    pub fn zeros(len: usize) -> Self {
        Self::new(vec![0.0; len])
    }

    pub fn with_parallelism(mut self, workers: usize) -> Self {
        self.parallelism = workers;
        self
    }

    pub fn set_parallelism(&mut self, workers: usize) {
        self.parallelism = workers;
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn copy_from(&mut self, other: &Self) -> Result<(), Error> {
        self.check_same_len(other)?;
        self.values.copy_from_slice(&other.values);
        Ok(())
    }

    pub fn nullify(&mut self) {
        self.values.fill(0.0);
    }

    /// Euclidean norm, i.e. the square root of the Hermitian self-product.
    pub fn norm(&self) -> f64 {
        let workers = parallel::resolve_workers(self.parallelism);
        let partials = parallel::map_chunks(self.values.len(), workers, |r| {
            self.values[r].iter().map(|v| v * v).sum::<f64>()
        });
        partials.into_iter().sum::<f64>().sqrt()
    }

    /// Hermitian inner product Σ conj(aᵢ)·bᵢ.
    pub fn hermitian_dot(&self, other: &Self) -> Result<Complex64, Error> {
        self.dot_impl(other, true)
    }

    /// Bilinear inner product Σ aᵢ·bᵢ, without conjugation. This is the
    /// inner product under which a complex-symmetric matrix is self-adjoint,
    /// so the Krylov recurrences orthogonalize against it.
    pub fn bilinear_dot(&self, other: &Self) -> Result<Complex64, Error> {
        self.dot_impl(other, false)
    }

    fn dot_impl(&self, other: &Self, conjugate: bool) -> Result<Complex64, Error> {
        self.check_even()?;
        other.check_even()?;
        self.check_same_len(other)?;
        let sign = if conjugate { -1.0 } else { 1.0 };
        let workers = parallel::resolve_workers(self.parallelism);
        let partials = parallel::map_chunks(self.values.len() / 2, workers, |r| {
            let mut sum = Complex64::new(0.0, 0.0);
            for i in r {
                let a = Complex64::new(self.values[2 * i], sign * self.values[2 * i + 1]);
                let b = Complex64::new(other.values[2 * i], other.values[2 * i + 1]);
                sum += a * b;
            }
            sum
        });
        Ok(partials.into_iter().sum())
    }

    /// out = self + other.
    pub fn add_into(&self, other: &Self, out: &mut Self) -> Result<(), Error> {
        out.copy_from(self)?;
        out.add_assign(other)
    }

    /// out = self − other.
    pub fn sub_into(&self, other: &Self, out: &mut Self) -> Result<(), Error> {
        self.check_same_len(other)?;
        out.copy_from(self)?;
        out.zip_assign(other, |a, b| *a -= b)
    }

    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        let mut out = self.scratch();
        self.add_into(other, &mut out)?;
        Ok(out)
    }

    pub fn sub(&self, other: &Self) -> Result<Self, Error> {
        let mut out = self.scratch();
        self.sub_into(other, &mut out)?;
        Ok(out)
    }

    /// self += other.
    pub fn add_assign(&mut self, other: &Self) -> Result<(), Error> {
        self.zip_assign(other, |a, b| *a += b)
    }

    /// self += alpha·x (complex axpy over interleaved pairs).
    pub fn axpy(&mut self, alpha: Complex64, x: &Self) -> Result<(), Error> {
        self.check_even()?;
        self.zip_pairs_assign(x, |a, b| {
            a[0] += alpha.re * b[0] - alpha.im * b[1];
            a[1] += alpha.re * b[1] + alpha.im * b[0];
        })
    }

    /// out = self + alpha·x.
    pub fn axpy_into(&self, alpha: Complex64, x: &Self, out: &mut Self) -> Result<(), Error> {
        out.copy_from(self)?;
        out.axpy(alpha, x)
    }

    /// self = alpha·self, multiplying each complex pair.
    pub fn scale_assign(&mut self, alpha: Complex64) -> Result<(), Error> {
        self.check_even()?;
        let workers = parallel::resolve_workers(self.parallelism);
        let chunk = pair_chunk(self.values.len(), workers);
        let kernel = |pair: &mut [f64]| {
            let z = alpha * Complex64::new(pair[0], pair[1]);
            pair[0] = z.re;
            pair[1] = z.im;
        };
        #[cfg(feature = "rayon")]
        if workers > 1 {
            use rayon::prelude::*;
            self.values
                .par_chunks_mut(chunk)
                .for_each(|c| c.chunks_exact_mut(2).for_each(kernel));
            return Ok(());
        }
        let _ = chunk;
        self.values.chunks_exact_mut(2).for_each(kernel);
        Ok(())
    }

    /// out = alpha·self.
    pub fn scale_into(&self, alpha: Complex64, out: &mut Self) -> Result<(), Error> {
        out.copy_from(self)?;
        out.scale_assign(alpha)
    }

    pub fn scale(&self, alpha: Complex64) -> Result<Self, Error> {
        let mut out = self.scratch();
        self.scale_into(alpha, &mut out)?;
        Ok(out)
    }

    /// Fresh zeroed vector of the same shape and parallelism.
    pub fn scratch(&self) -> Self {
        Self::zeros(self.len()).with_parallelism(self.parallelism)
    }

    fn check_same_len(&self, other: &Self) -> Result<(), Error> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch { expected: self.len(), actual: other.len() });
        }
        Ok(())
    }

    fn check_even(&self) -> Result<(), Error> {
        if self.len() % 2 != 0 {
            return Err(Error::OddLength(self.len()));
        }
        Ok(())
    }

    fn zip_assign<F>(&mut self, other: &Self, f: F) -> Result<(), Error>
    where
        F: Fn(&mut f64, f64) + Sync + Send,
    {
        self.check_same_len(other)?;
        let workers = parallel::resolve_workers(self.parallelism);
        #[cfg(feature = "rayon")]
        if workers > 1 {
            use rayon::prelude::*;
            let chunk = pair_chunk(self.values.len(), workers);
            self.values
                .par_chunks_mut(chunk)
                .zip(other.values.par_chunks(chunk))
                .for_each(|(a, b)| a.iter_mut().zip(b).for_each(|(x, &y)| f(x, y)));
            return Ok(());
        }
        let _ = workers;
        self.values.iter_mut().zip(&other.values).for_each(|(x, &y)| f(x, y));
        Ok(())
    }

    fn zip_pairs_assign<F>(&mut self, other: &Self, f: F) -> Result<(), Error>
    where
        F: Fn(&mut [f64], &[f64]) + Sync + Send,
    {
        self.check_same_len(other)?;
        let workers = parallel::resolve_workers(self.parallelism);
        #[cfg(feature = "rayon")]
        if workers > 1 {
            use rayon::prelude::*;
            let chunk = pair_chunk(self.values.len(), workers);
            self.values
                .par_chunks_mut(chunk)
                .zip(other.values.par_chunks(chunk))
                .for_each(|(a, b)| {
                    a.chunks_exact_mut(2).zip(b.chunks_exact(2)).for_each(|(x, y)| f(x, y))
                });
            return Ok(());
        }
        let _ = workers;
        self.values
            .chunks_exact_mut(2)
            .zip(other.values.chunks_exact(2))
            .for_each(|(x, y)| f(x, y));
        Ok(())
    }
}

impl From<Vec<f64>> for ComplexVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// Chunk size that never splits an interleaved (re, im) pair.
fn pair_chunk(len: usize, workers: usize) -> usize {
    let pairs = (len / 2).max(1);
    pairs.div_ceil(workers.max(1)).max(1) * 2
}
