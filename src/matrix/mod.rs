//! Block-sparse complex-symmetric matrix storage.

pub mod block;
pub mod value;

pub use block::BlockMatrix;
pub use value::ComplexValue;
