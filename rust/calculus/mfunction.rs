use crate::calculus::stencil::{
    central_derivative, central_partial, central_second_derivative, mixed_partial,
    FIRST_ORDER_STEP, SECOND_ORDER_STEP,
};
use crate::error::{MathError, MathResult};
use crate::linalg::{Matrix, Vector};
use log::debug;
use std::fmt;
use std::sync::Arc;

type Rule = Arc<dyn Fn(&Vector) -> MathResult<Vector> + Send + Sync>;

/// A function from `R^n` to `R^m` whose derivatives are estimated numerically.
///
/// The function is described only by its evaluation rule; every operator works by
/// evaluating the rule at perturbed inputs with fixed-step central differences. The
/// classification flags are derived once at construction and gate which operators apply:
///
/// - *parametric*: `n == 1`, a curve,
/// - *scalar valued*: `m == 1`,
/// - *vector field*: `m == n`.
///
/// Results are never cached, and the rule is assumed to be pure and deterministic.
#[cfg_attr(feature = "python", pyo3::pyclass(module = "multivariable.rs"))]
#[derive(Clone)]
pub struct MFunction {
    input_dim: usize,
    output_dim: usize,
    is_parametric: bool,
    is_scalar_valued: bool,
    is_vector_field: bool,
    rule: Rule,
}

/// Curl of a vector field in two or three dimensions.
#[derive(Clone, Debug, PartialEq)]
pub enum Curl {
    /// The scalar `dQ/dx - dP/dy` of a planar field `(P, Q)`.
    Planar(f64),
    /// The full curl of a spatial field `(P, Q, R)`.
    Spatial(Vector),
}

impl fmt::Debug for MFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MFunction")
            .field("input_dim", &self.input_dim)
            .field("output_dim", &self.output_dim)
            .field("is_parametric", &self.is_parametric)
            .field("is_scalar_valued", &self.is_scalar_valued)
            .field("is_vector_field", &self.is_vector_field)
            .finish_non_exhaustive()
    }
}

impl MFunction {
    /// Create an `MFunction` from a rule that may fail.
    pub fn from_fallible<F>(input_dim: usize, output_dim: usize, rule: F) -> MathResult<Self>
    where
        F: Fn(&Vector) -> MathResult<Vector> + Send + Sync + 'static,
    {
        if input_dim == 0 || output_dim == 0 {
            return Err(MathError::InvalidShape(format!(
                "function dimensions must be at least 1, got R^{} -> R^{}",
                input_dim, output_dim
            )));
        }
        Ok(Self {
            input_dim,
            output_dim,
            is_parametric: input_dim == 1,
            is_scalar_valued: output_dim == 1,
            is_vector_field: input_dim == output_dim,
            rule: Arc::new(rule),
        })
    }

    /// Create an `MFunction` from `R^n` to `R^m`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multivariable::calculus::MFunction;
    /// # use multivariable::linalg::Vector;
    /// let f = MFunction::try_new(2, 2, |v: &Vector| v.clone()).unwrap();
    /// let p = Vector::try_new(vec![1.0, 2.0]).unwrap();
    /// assert!((f.divergence_at(&p).unwrap() - 2.0).abs() < 1e-4);
    /// ```
    pub fn try_new<F>(input_dim: usize, output_dim: usize, rule: F) -> MathResult<Self>
    where
        F: Fn(&Vector) -> Vector + Send + Sync + 'static,
    {
        Self::from_fallible(input_dim, output_dim, move |v| Ok(rule(v)))
    }

    /// Create a scalar valued `MFunction` from `R^n` to `R`.
    ///
    /// The scalar result is carried as a single component vector.
    pub fn scalar<F>(input_dim: usize, rule: F) -> MathResult<Self>
    where
        F: Fn(&Vector) -> f64 + Send + Sync + 'static,
    {
        Self::from_fallible(input_dim, 1, move |v| Vector::try_new(vec![rule(v)]))
    }

    /// Create a parametric `MFunction`, a curve from `R` to `R^m`.
    pub fn curve<F>(output_dim: usize, rule: F) -> MathResult<Self>
    where
        F: Fn(f64) -> Vector + Send + Sync + 'static,
    {
        Self::from_fallible(1, output_dim, move |v| Ok(rule(v.get(0)?)))
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    pub fn is_parametric(&self) -> bool {
        self.is_parametric
    }

    pub fn is_scalar_valued(&self) -> bool {
        self.is_scalar_valued
    }

    pub fn is_vector_field(&self) -> bool {
        self.is_vector_field
    }

    fn check_input(&self, v: &Vector) -> MathResult<()> {
        if v.dim() != self.input_dim {
            return Err(MathError::DimensionMismatch {
                expected: self.input_dim,
                found: v.dim(),
            });
        }
        Ok(())
    }

    fn require(&self, condition: bool, operator: &str, requirement: &str) -> MathResult<()> {
        if !condition {
            return Err(MathError::NotSupported(format!(
                "{} requires {}, got R^{} -> R^{}",
                operator, requirement, self.input_dim, self.output_dim
            )));
        }
        Ok(())
    }

    /// Evaluate the rule at `v`, checking both input and output dimensions.
    pub fn evaluate(&self, v: &Vector) -> MathResult<Vector> {
        self.check_input(v)?;
        let out = (self.rule)(v)?;
        if out.dim() != self.output_dim {
            return Err(MathError::DimensionMismatch {
                expected: self.output_dim,
                found: out.dim(),
            });
        }
        Ok(out)
    }

    /// Evaluate a parametric function at parameter `t`.
    pub fn evaluate_at_parameter(&self, t: f64) -> MathResult<Vector> {
        self.require(self.is_parametric, "parameter evaluation", "a parametric function")?;
        self.evaluate(&Vector::try_new(vec![t])?)
    }

    /// First partial derivative with respect to input `index` at `v`.
    pub fn partial_derivative(&self, index: usize, v: &Vector) -> MathResult<Vector> {
        self.require(!self.is_parametric, "partial derivative", "a non-parametric function")?;
        self.check_input(v)?;
        central_partial(|u| self.evaluate(u), v, index, FIRST_ORDER_STEP)
    }

    /// Second partial derivative with respect to inputs `i` and `j` at `v`.
    pub fn second_partial_derivative(&self, i: usize, j: usize, v: &Vector) -> MathResult<Vector> {
        self.require(
            !self.is_parametric,
            "second partial derivative",
            "a non-parametric function",
        )?;
        self.check_input(v)?;
        mixed_partial(|u| self.evaluate(u), v, i, j, SECOND_ORDER_STEP)
    }

    /// First derivative `r'(t)` of a parametric function.
    pub fn first_parametric_derivative(&self, t: f64) -> MathResult<Vector> {
        self.require(self.is_parametric, "parametric derivative", "a parametric function")?;
        central_derivative(|s| self.evaluate_at_parameter(s), t, FIRST_ORDER_STEP)
    }

    /// Second derivative `r''(t)` of a parametric function.
    pub fn second_parametric_derivative(&self, t: f64) -> MathResult<Vector> {
        self.require(self.is_parametric, "parametric derivative", "a parametric function")?;
        central_second_derivative(|s| self.evaluate_at_parameter(s), t, SECOND_ORDER_STEP)
    }

    /// The `m` x `n` Jacobian at `v`.
    ///
    /// Column `i` holds the partial derivative with respect to input `i`. For a
    /// parametric function the single column is the curve derivative at `t = v[0]`.
    pub fn jacobian_at(&self, v: &Vector) -> MathResult<Matrix> {
        self.check_input(v)?;
        if self.is_parametric {
            return Matrix::try_new(vec![self.first_parametric_derivative(v.get(0)?)?]);
        }
        Matrix::try_new(
            (0..self.input_dim)
                .map(|i| self.partial_derivative(i, v))
                .collect::<MathResult<Vec<Vector>>>()?,
        )
    }

    /// Gradient of a scalar valued function, the transposed `1 x n` Jacobian.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multivariable::calculus::MFunction;
    /// # use multivariable::linalg::Vector;
    /// let f = MFunction::scalar(2, |v: &Vector| v.norm_squared()).unwrap();
    /// let g = f.gradient_at(&Vector::try_new(vec![1.0, 2.0]).unwrap()).unwrap();
    /// assert!(g.is_close(&Vector::try_new(vec![2.0, 4.0]).unwrap(), 1e-4));
    /// ```
    pub fn gradient_at(&self, v: &Vector) -> MathResult<Vector> {
        self.require(self.is_scalar_valued, "gradient", "a scalar valued function")?;
        Ok(self.jacobian_at(v)?.transpose().column(0)?.clone())
    }

    /// The `n` x `n` Hessian of a scalar valued function, built column by column.
    pub fn hessian_at(&self, v: &Vector) -> MathResult<Matrix> {
        self.require(self.is_scalar_valued, "Hessian", "a scalar valued function")?;
        self.require(!self.is_parametric, "Hessian", "a non-parametric function")?;
        self.check_input(v)?;
        let columns = (0..self.input_dim)
            .map(|col| {
                let coords = (0..self.input_dim)
                    .map(|row| self.second_partial_derivative(row, col, v)?.get(0))
                    .collect::<MathResult<Vec<f64>>>()?;
                Vector::try_new(coords)
            })
            .collect::<MathResult<Vec<Vector>>>()?;
        Matrix::try_new(columns)
    }

    /// Rate of change at `x` along the direction `v`, `grad f(x) . v`.
    pub fn directional_derivative(&self, x: &Vector, v: &Vector) -> MathResult<f64> {
        self.gradient_at(x)?.dot(v)
    }

    /// Divergence of a vector field, the trace of its Jacobian.
    pub fn divergence_at(&self, v: &Vector) -> MathResult<f64> {
        self.require(self.is_vector_field, "divergence", "a vector field")?;
        self.require(!self.is_parametric, "divergence", "a non-parametric function")?;
        self.jacobian_at(v)?.trace()
    }

    /// Laplacian of a scalar valued function, the trace of its Hessian.
    pub fn laplacian_at(&self, v: &Vector) -> MathResult<f64> {
        self.require(self.is_scalar_valued, "Laplacian", "a scalar valued function")?;
        self.hessian_at(v)?.trace()
    }

    /// Curl of a vector field in two or three dimensions.
    ///
    /// Fields of any other dimension have no curl here and return `NotSupported`.
    pub fn curl_at(&self, v: &Vector) -> MathResult<Curl> {
        self.require(self.is_vector_field, "curl", "a vector field")?;
        match self.input_dim {
            2 => {
                // f(x, y) = (P, Q)
                let q_x = self.partial_derivative(0, v)?.get(1)?;
                let p_y = self.partial_derivative(1, v)?.get(0)?;
                Ok(Curl::Planar(q_x - p_y))
            }
            3 => {
                // f(x, y, z) = (P, Q, R), entry (row, col) is d(row)/d(col)
                let j = self.jacobian_at(v)?;
                let x = j.get(2, 1)? - j.get(1, 2)?;
                let y = j.get(0, 2)? - j.get(2, 0)?;
                let z = j.get(1, 0)? - j.get(0, 1)?;
                Ok(Curl::Spatial(Vector::try_new(vec![x, y, z])?))
            }
            n => Err(MathError::NotSupported(format!(
                "curl is only defined in 2 or 3 dimensions, got {}",
                n
            ))),
        }
    }

    /// Curvature of a curve at parameter `t`.
    ///
    /// `sqrt(|r''|^2 |r'|^2 - (r'' . r')^2) / |r'|^3`
    pub fn curvature_at(&self, t: f64) -> MathResult<f64> {
        self.require(self.is_parametric, "curvature", "a parametric function")?;
        let d1 = self.first_parametric_derivative(t)?;
        let d2 = self.second_parametric_derivative(t)?;
        let d1_norm = d1.norm();
        if d1_norm == 0.0_f64 {
            return Err(MathError::ZeroVector);
        }
        let mut radicand = d2.norm_squared() * d1.norm_squared() - d2.dot(&d1)?.powi(2);
        if radicand < 0.0_f64 {
            debug!("clamping negative curvature radicand {} at t = {}", radicand, t);
            radicand = 0.0_f64;
        }
        Ok(radicand.sqrt() / d1_norm.powi(3))
    }

    /// Unit tangent `r'(t) / |r'(t)|` of a curve.
    pub fn unit_tangent_at(&self, t: f64) -> MathResult<Vector> {
        self.require(self.is_parametric, "unit tangent", "a parametric function")?;
        self.first_parametric_derivative(t)?.unit()
    }

    /// Principal unit normal of a curve, the normalized derivative of its unit tangent.
    ///
    /// Both levels of the nested difference use the second order step; the first order
    /// step would amplify rounding error in the inner tangent by its reciprocal.
    pub fn principal_unit_normal_at(&self, t: f64) -> MathResult<Vector> {
        self.require(self.is_parametric, "principal unit normal", "a parametric function")?;
        let tangent = |s: f64| -> MathResult<Vector> {
            central_derivative(|u| self.evaluate_at_parameter(u), s, SECOND_ORDER_STEP)?.unit()
        };
        central_derivative(tangent, t, SECOND_ORDER_STEP)?.unit()
    }
}
