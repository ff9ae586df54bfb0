//! Wrapper module to export Rust linear algebra types to Python using pyo3 bindings.

use crate::json::json_py::DeserializedObj;
use crate::json::JSON;
use crate::linalg::basis::find_null_space_basis;
use crate::linalg::matrix::Matrix;
use crate::linalg::solver::{rref, solve, Solution};
use crate::linalg::vector::Vector;
use bincode::config::legacy;
use bincode::serde::{decode_from_slice, encode_to_vec};
use numpy::{PyArray1, PyArray2, ToPyArray};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

fn pickle_error<E: std::fmt::Display>(e: E) -> PyErr {
    PyValueError::new_err(format!("Failed to pickle object.\n{}", e))
}

#[pymethods]
impl Vector {
    #[new]
    fn new_py(values: Vec<f64>) -> PyResult<Self> {
        Ok(Vector::try_new(values)?)
    }

    #[getter]
    #[pyo3(name = "dim")]
    fn dim_py(&self) -> usize {
        self.dim()
    }

    #[pyo3(name = "to_list")]
    fn to_list_py(&self) -> Vec<f64> {
        self.to_vec()
    }

    /// Return the components as a one dimensional numpy array.
    #[pyo3(name = "to_numpy")]
    fn to_numpy_py<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.data.to_pyarray(py)
    }

    #[pyo3(name = "dot")]
    fn dot_py(&self, other: &Vector) -> PyResult<f64> {
        Ok(self.dot(other)?)
    }

    #[pyo3(name = "norm")]
    fn norm_py(&self) -> f64 {
        self.norm()
    }

    #[pyo3(name = "unit")]
    fn unit_py(&self) -> PyResult<Vector> {
        Ok(self.unit()?)
    }

    fn __getitem__(&self, index: usize) -> PyResult<f64> {
        Ok(self.get(index)?)
    }

    fn __setitem__(&mut self, index: usize, value: f64) -> PyResult<()> {
        Ok(self.set(index, value)?)
    }

    fn __len__(&self) -> usize {
        self.dim()
    }

    fn __add__(&self, other: &Vector) -> PyResult<Vector> {
        Ok(self.try_add(other)?)
    }

    fn __sub__(&self, other: &Vector) -> PyResult<Vector> {
        Ok(self.try_sub(other)?)
    }

    fn __mul__(&self, k: f64) -> Vector {
        self.scale(k)
    }

    fn __rmul__(&self, k: f64) -> Vector {
        self.scale(k)
    }

    fn __neg__(&self) -> Vector {
        -self
    }

    fn __eq__(&self, other: &Vector) -> bool {
        self.eq(other)
    }

    fn __repr__(&self) -> String {
        format!("<multivariable.Vector {} at {:p}>", self, self)
    }

    fn __str__(&self) -> String {
        self.to_string()
    }

    // JSON
    #[pyo3(name = "to_json")]
    fn to_json_py(&self) -> PyResult<String> {
        match DeserializedObj::Vector(self.clone()).to_json() {
            Ok(v) => Ok(v),
            Err(_) => Err(PyValueError::new_err(
                "Failed to serialize `Vector` to JSON.",
            )),
        }
    }

    // Pickling
    pub fn __setstate__(&mut self, state: Bound<'_, PyBytes>) -> PyResult<()> {
        *self = decode_from_slice(state.as_bytes(), legacy())
            .map_err(pickle_error)?
            .0;
        Ok(())
    }
    pub fn __getstate__<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        Ok(PyBytes::new(
            py,
            &encode_to_vec(self, legacy()).map_err(pickle_error)?,
        ))
    }
    pub fn __getnewargs__(&self) -> (Vec<f64>,) {
        (self.to_vec(),)
    }
}

#[pymethods]
impl Matrix {
    /// Create a `Matrix` from a list of rows.
    #[new]
    fn new_py(rows: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(Matrix::from_rows(rows)?)
    }

    /// Create a `Matrix` from a list of column vectors.
    #[staticmethod]
    #[pyo3(name = "from_columns")]
    fn from_columns_py(columns: Vec<Vector>) -> PyResult<Self> {
        Ok(Matrix::try_new(columns)?)
    }

    #[staticmethod]
    #[pyo3(name = "identity")]
    fn identity_py(n: usize) -> PyResult<Self> {
        Ok(Matrix::identity(n)?)
    }

    #[getter]
    #[pyo3(name = "shape")]
    fn shape_py(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    #[pyo3(name = "to_list")]
    fn to_list_py(&self) -> Vec<Vec<f64>> {
        self.to_array2().outer_iter().map(|r| r.to_vec()).collect()
    }

    /// Return the entries as a two dimensional numpy array.
    #[pyo3(name = "to_numpy")]
    fn to_numpy_py<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.to_array2().to_pyarray(py)
    }

    #[pyo3(name = "column")]
    fn column_py(&self, col: usize) -> PyResult<Vector> {
        Ok(self.column(col)?.clone())
    }

    #[pyo3(name = "row")]
    fn row_py(&self, row: usize) -> PyResult<Vector> {
        Ok(self.row(row)?)
    }

    #[pyo3(name = "transpose")]
    fn transpose_py(&self) -> Matrix {
        self.transpose()
    }

    #[pyo3(name = "trace")]
    fn trace_py(&self) -> PyResult<f64> {
        Ok(self.trace()?)
    }

    #[pyo3(name = "rank")]
    fn rank_py(&self) -> usize {
        self.rank()
    }

    #[pyo3(name = "inverse")]
    fn inverse_py(&self) -> PyResult<Matrix> {
        Ok(self.inverse()?)
    }

    #[pyo3(name = "augment")]
    fn augment_py(&self, v: &Vector) -> PyResult<Matrix> {
        Ok(self.augment(v)?)
    }

    fn __getitem__(&self, index: (usize, usize)) -> PyResult<f64> {
        Ok(self.get(index.0, index.1)?)
    }

    fn __add__(&self, other: &Matrix) -> PyResult<Matrix> {
        Ok(self.try_add(other)?)
    }

    fn __sub__(&self, other: &Matrix) -> PyResult<Matrix> {
        Ok(self.try_sub(other)?)
    }

    fn __mul__(&self, k: f64) -> Matrix {
        self.scale(k)
    }

    fn __rmul__(&self, k: f64) -> Matrix {
        self.scale(k)
    }

    fn __matmul__(&self, other: MatrixOrVector) -> PyResult<MatrixOrVector> {
        match other {
            MatrixOrVector::Matrix(m) => Ok(MatrixOrVector::Matrix(self.mul_matrix(&m)?)),
            MatrixOrVector::Vector(v) => Ok(MatrixOrVector::Vector(self.mul_vector(&v)?)),
        }
    }

    fn __eq__(&self, other: &Matrix) -> bool {
        self.eq(other)
    }

    fn __repr__(&self) -> String {
        format!(
            "<multivariable.Matrix {}x{} at {:p}>",
            self.nrows(),
            self.ncols(),
            self
        )
    }

    fn __str__(&self) -> String {
        self.to_string()
    }

    // JSON
    #[pyo3(name = "to_json")]
    fn to_json_py(&self) -> PyResult<String> {
        match DeserializedObj::Matrix(self.clone()).to_json() {
            Ok(v) => Ok(v),
            Err(_) => Err(PyValueError::new_err(
                "Failed to serialize `Matrix` to JSON.",
            )),
        }
    }

    // Pickling
    pub fn __setstate__(&mut self, state: Bound<'_, PyBytes>) -> PyResult<()> {
        *self = decode_from_slice(state.as_bytes(), legacy())
            .map_err(pickle_error)?
            .0;
        Ok(())
    }
    pub fn __getstate__<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        Ok(PyBytes::new(
            py,
            &encode_to_vec(self, legacy()).map_err(pickle_error)?,
        ))
    }
    pub fn __getnewargs__(&self) -> (Vec<Vec<f64>>,) {
        (self.to_list_py(),)
    }
}

/// Right operand of a matrix product.
#[derive(FromPyObject, IntoPyObject)]
pub(crate) enum MatrixOrVector {
    Matrix(Matrix),
    Vector(Vector),
}

/// Reduce a matrix to row-echelon form.
///
/// Returns the reduced matrix and the indices of its pivot columns.
#[pyfunction]
#[pyo3(name = "rref")]
pub(crate) fn rref_py(a: &Matrix) -> (Matrix, Vec<usize>) {
    let reduction = rref(a);
    let pivots = reduction
        .pivot_columns()
        .into_iter()
        .map(|(col, _)| col)
        .collect();
    (reduction.matrix().clone(), pivots)
}

/// Solve `A x = b`.
///
/// Returns ``None`` for an inconsistent system, otherwise a particular solution and the
/// indices of the free variables, which are empty when the solution is unique.
#[pyfunction]
#[pyo3(name = "solve")]
pub(crate) fn solve_py(a: &Matrix, b: &Vector) -> PyResult<Option<(Vector, Vec<usize>)>> {
    match solve(a, b)? {
        Solution::Unique(x) => Ok(Some((x, Vec::new()))),
        Solution::Infinite { particular, free } => Ok(Some((particular, free))),
        Solution::Inconsistent => Ok(None),
    }
}

#[pyfunction]
#[pyo3(name = "null_space_basis")]
pub(crate) fn null_space_basis_py(a: &Matrix) -> Vec<Vector> {
    find_null_space_basis(a)
}
