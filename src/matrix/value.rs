//! Compact complex scalar used for block storage.
//!
//! Blocks are stored with width 1 (purely real) or 2 (real, imag). A value
//! whose imaginary part is exactly zero at construction collapses to the
//! real form; its imaginary part reads back as 0.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComplexValue {
    Real(f64),
    Complex(f64, f64),
}

impl ComplexValue {
    pub fn new(real: f64, imaginary: f64) -> Self {
        if imaginary == 0.0 {
            ComplexValue::Real(real)
        } else {
            ComplexValue::Complex(real, imaginary)
        }
    }

    /// Read a stored block of width 1 or 2. Wider blocks are a structural
    /// bug in the caller.
    pub fn from_block(block: &[f64]) -> Self {
        match *block {
            [re] => ComplexValue::Real(re),
            [re, im] => ComplexValue::Complex(re, im),
            _ => unreachable!("block width must be 1 or 2"),
        }
    }

    pub fn real(&self) -> f64 {
        match *self {
            ComplexValue::Real(re) | ComplexValue::Complex(re, _) => re,
        }
    }

    pub fn imaginary(&self) -> f64 {
        match *self {
            ComplexValue::Real(_) => 0.0,
            ComplexValue::Complex(_, im) => im,
        }
    }

    /// Stored width: 1 for the real form, 2 otherwise.
    pub fn width(&self) -> usize {
        match self {
            ComplexValue::Real(_) => 1,
            ComplexValue::Complex(..) => 2,
        }
    }
}

impl Default for ComplexValue {
    fn default() -> Self {
        ComplexValue::Real(0.0)
    }
}
