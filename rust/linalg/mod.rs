//! Vector and matrix algebra, row reduction and null-space bases.
//!
//! # Storage
//!
//! A [Vector] wraps an `ndarray` [Array1](ndarray::Array1) of `f64`. A [Matrix] is an
//! ordered sequence of column vectors, which makes column access and construction from
//! column data cheap. Row reduction converts to a row-major working array and back.
//!
//! # Row reduction
//!
//! [rref] performs Gauss-Jordan elimination with partial pivoting and classifies every
//! column as a pivot column or a free column. [solve], [inverse] and
//! [find_null_space_basis] are all read off that classification.

pub mod basis;
#[cfg(feature = "python")]
pub(crate) mod linalg_py;
pub mod matrix;
pub mod solver;
pub mod vector;
mod vector_ops;

pub use crate::linalg::basis::{find_null_space_basis, in_null_space, nullity};
pub use crate::linalg::matrix::Matrix;
pub use crate::linalg::solver::{
    inverse, rank, rref, solve, ColumnKind, Reduction, Solution, PIVOT_TOLERANCE,
};
pub use crate::linalg::vector::Vector;
