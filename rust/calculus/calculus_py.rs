//! Wrapper module to export numerical differentiation of Python callables using pyo3 bindings.

use crate::calculus::mfunction::{Curl, MFunction};
use crate::error::{MathError, MathResult};
use crate::linalg::{Matrix, Vector};
use pyo3::prelude::*;

/// Curl returned to Python, a float for planar fields and a `Vector` otherwise.
#[derive(IntoPyObject)]
pub(crate) enum CurlPy {
    Planar(f64),
    Spatial(Vector),
}

impl From<Curl> for CurlPy {
    fn from(curl: Curl) -> Self {
        match curl {
            Curl::Planar(c) => CurlPy::Planar(c),
            Curl::Spatial(v) => CurlPy::Spatial(v),
        }
    }
}

/// Call a Python callable with the components of `v`.
///
/// The callable may return a float, interpreted as a single component, or a sequence of
/// floats. Any raised exception or unexpected return type becomes an evaluation error.
fn call_python(func: &Py<PyAny>, v: &Vector) -> MathResult<Vector> {
    Python::with_gil(|py| {
        let out = func
            .call1(py, (v.to_vec(),))
            .map_err(|e| MathError::Evaluation(e.to_string()))?;
        let values = match out.extract::<f64>(py) {
            Ok(x) => vec![x],
            Err(_) => out
                .extract::<Vec<f64>>(py)
                .map_err(|e| MathError::Evaluation(e.to_string()))?,
        };
        Vector::try_new(values)
    })
}

#[pymethods]
impl MFunction {
    /// Wrap a Python callable mapping a list of ``input_dim`` floats to ``output_dim`` floats.
    ///
    /// Parameters
    /// ----------
    /// func: Callable[[list[float]], float | list[float]]
    ///     The evaluation rule. Scalar valued functions may return a plain float.
    /// input_dim: int
    ///     Dimension of the domain.
    /// output_dim: int
    ///     Dimension of the codomain.
    ///
    /// Returns
    /// -------
    /// MFunction
    #[new]
    fn new_py(func: Py<PyAny>, input_dim: usize, output_dim: usize) -> PyResult<Self> {
        Ok(MFunction::from_fallible(input_dim, output_dim, move |v| {
            call_python(&func, v)
        })?)
    }

    #[getter]
    #[pyo3(name = "input_dim")]
    fn input_dim_py(&self) -> usize {
        self.input_dim()
    }

    #[getter]
    #[pyo3(name = "output_dim")]
    fn output_dim_py(&self) -> usize {
        self.output_dim()
    }

    #[getter]
    #[pyo3(name = "is_parametric")]
    fn is_parametric_py(&self) -> bool {
        self.is_parametric()
    }

    #[getter]
    #[pyo3(name = "is_scalar_valued")]
    fn is_scalar_valued_py(&self) -> bool {
        self.is_scalar_valued()
    }

    #[getter]
    #[pyo3(name = "is_vector_field")]
    fn is_vector_field_py(&self) -> bool {
        self.is_vector_field()
    }

    #[pyo3(name = "evaluate")]
    fn evaluate_py(&self, v: &Vector) -> PyResult<Vector> {
        Ok(self.evaluate(v)?)
    }

    #[pyo3(name = "partial_derivative")]
    fn partial_derivative_py(&self, index: usize, v: &Vector) -> PyResult<Vector> {
        Ok(self.partial_derivative(index, v)?)
    }

    #[pyo3(name = "second_partial_derivative")]
    fn second_partial_derivative_py(&self, i: usize, j: usize, v: &Vector) -> PyResult<Vector> {
        Ok(self.second_partial_derivative(i, j, v)?)
    }

    #[pyo3(name = "first_parametric_derivative")]
    fn first_parametric_derivative_py(&self, t: f64) -> PyResult<Vector> {
        Ok(self.first_parametric_derivative(t)?)
    }

    #[pyo3(name = "second_parametric_derivative")]
    fn second_parametric_derivative_py(&self, t: f64) -> PyResult<Vector> {
        Ok(self.second_parametric_derivative(t)?)
    }

    #[pyo3(name = "jacobian")]
    fn jacobian_py(&self, v: &Vector) -> PyResult<Matrix> {
        Ok(self.jacobian_at(v)?)
    }

    #[pyo3(name = "gradient")]
    fn gradient_py(&self, v: &Vector) -> PyResult<Vector> {
        Ok(self.gradient_at(v)?)
    }

    #[pyo3(name = "hessian")]
    fn hessian_py(&self, v: &Vector) -> PyResult<Matrix> {
        Ok(self.hessian_at(v)?)
    }

    #[pyo3(name = "directional_derivative")]
    fn directional_derivative_py(&self, x: &Vector, v: &Vector) -> PyResult<f64> {
        Ok(self.directional_derivative(x, v)?)
    }

    #[pyo3(name = "divergence")]
    fn divergence_py(&self, v: &Vector) -> PyResult<f64> {
        Ok(self.divergence_at(v)?)
    }

    #[pyo3(name = "laplacian")]
    fn laplacian_py(&self, v: &Vector) -> PyResult<f64> {
        Ok(self.laplacian_at(v)?)
    }

    #[pyo3(name = "curl")]
    fn curl_py(&self, v: &Vector) -> PyResult<CurlPy> {
        Ok(self.curl_at(v)?.into())
    }

    #[pyo3(name = "curvature")]
    fn curvature_py(&self, t: f64) -> PyResult<f64> {
        Ok(self.curvature_at(t)?)
    }

    #[pyo3(name = "unit_tangent")]
    fn unit_tangent_py(&self, t: f64) -> PyResult<Vector> {
        Ok(self.unit_tangent_at(t)?)
    }

    #[pyo3(name = "principal_unit_normal")]
    fn principal_unit_normal_py(&self, t: f64) -> PyResult<Vector> {
        Ok(self.principal_unit_normal_at(t)?)
    }

    fn __repr__(&self) -> String {
        format!(
            "<multivariable.MFunction R^{} -> R^{} at {:p}>",
            self.input_dim(),
            self.output_dim(),
            self
        )
    }
}
