//! Error taxonomy shared by the linear algebra and calculus modules.

use thiserror::Error;

/// Failures raised at the point of a violated precondition.
///
/// None of these are transient: every operation in the crate is a pure computation, so
/// a failure is surfaced to the caller unmodified and never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Operands have incompatible sizes.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Size required by the operation.
        expected: usize,
        /// Size that was supplied.
        found: usize,
    },

    /// Malformed or empty construction input.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// A component, row or column index outside of the valid range.
    #[error("Index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Operation requires a square matrix.
    #[error("Matrix is not square: {rows} rows and {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    /// Matrix has a free column and cannot be inverted.
    #[error("Matrix is singular")]
    Singular,

    /// Operator is structurally invalid for the shape of the function.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Normalisation of a vector with zero length.
    #[error("Cannot normalise a zero vector")]
    ZeroVector,

    /// A fallible evaluation rule reported a failure.
    #[error("Function evaluation failed: {0}")]
    Evaluation(String),
}

/// Result alias used throughout the crate.
pub type MathResult<T> = Result<T, MathError>;

#[cfg(feature = "python")]
impl From<MathError> for pyo3::PyErr {
    fn from(err: MathError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyTypeError, PyValueError};
        match err {
            MathError::IndexOutOfRange { .. } => PyIndexError::new_err(err.to_string()),
            MathError::NotSupported(_) => PyTypeError::new_err(err.to_string()),
            MathError::Evaluation(_) => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
