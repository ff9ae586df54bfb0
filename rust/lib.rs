//! This is the documentation for multivariable-rs
//!
//! Linear algebra over real vectors and matrices, with reduced row-echelon form and
//! null-space bases, and numerical differential operators on functions `R^n -> R^m`.
//!
//! - [linalg]: [Vector](linalg::Vector), [Matrix](linalg::Matrix), row reduction,
//!   linear solves, inverses and null-space bases.
//! - [calculus]: [MFunction](calculus::MFunction) and its finite difference operators.
//! - [json]: JSON conversion of the linear algebra types.
//! - [error]: the [MathError](error::MathError) returned by every fallible operation.
//!
//! Python bindings are compiled with the `python` cargo feature.

#[cfg(test)]
mod tests;

pub mod error;

pub mod json;
#[cfg(feature = "python")]
use crate::json::json_py::from_json_py;

pub mod linalg;
#[cfg(feature = "python")]
use linalg::linalg_py::{null_space_basis_py, rref_py, solve_py};

pub mod calculus;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // JSON
    m.add_function(wrap_pyfunction!(from_json_py, m)?)?;

    // Linear algebra
    m.add_class::<linalg::Vector>()?;
    m.add_class::<linalg::Matrix>()?;
    m.add_function(wrap_pyfunction!(rref_py, m)?)?;
    m.add_function(wrap_pyfunction!(solve_py, m)?)?;
    m.add_function(wrap_pyfunction!(null_space_basis_py, m)?)?;

    // Calculus
    m.add_class::<calculus::MFunction>()?;

    Ok(())
}
