use crate::error::{MathError, MathResult};
use crate::json::JSON;
use itertools::Itertools;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered tuple of real components with a fixed dimension of at least one.
///
/// Vectors are value types: arithmetic returns new instances and [`Clone`] is the copy
/// operation. The only in-place update is [`Vector::set`].
#[cfg_attr(feature = "python", pyo3::pyclass(module = "multivariable.rs"))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VectorDataModel")]
pub struct Vector {
    pub(crate) data: Array1<f64>,
}

#[derive(Deserialize)]
struct VectorDataModel {
    data: Array1<f64>,
}

impl TryFrom<VectorDataModel> for Vector {
    type Error = MathError;

    fn try_from(model: VectorDataModel) -> Result<Self, Self::Error> {
        Vector::from_array(model.data)
    }
}

impl JSON for Vector {}

impl Vector {
    /// Create a `Vector` from its components.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multivariable::linalg::Vector;
    /// let v = Vector::try_new(vec![3.0, 4.0]).unwrap();
    /// assert_eq!(v.norm(), 5.0);
    /// assert!(Vector::try_new(vec![]).is_err());
    /// ```
    pub fn try_new(values: Vec<f64>) -> MathResult<Self> {
        Self::from_array(Array1::from_vec(values))
    }

    /// Create a `Vector` taking ownership of an existing array.
    pub fn from_array(data: Array1<f64>) -> MathResult<Self> {
        if data.is_empty() {
            return Err(MathError::InvalidShape(
                "a vector must have at least one component".to_string(),
            ));
        }
        Ok(Self { data })
    }

    /// The zero vector of dimension `n`.
    pub fn zeros(n: usize) -> MathResult<Self> {
        Self::from_array(Array1::zeros(n))
    }

    /// The standard basis vector `e_i` of dimension `n`.
    pub fn unit_basis(n: usize, i: usize) -> MathResult<Self> {
        let mut v = Self::zeros(n)?;
        v.set(i, 1.0)?;
        Ok(v)
    }

    pub fn dim(&self) -> usize {
        self.data.len()
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    fn check_index(&self, index: usize) -> MathResult<()> {
        if index >= self.dim() {
            return Err(MathError::IndexOutOfRange {
                index,
                len: self.dim(),
            });
        }
        Ok(())
    }

    fn check_dim(&self, other: &Vector) -> MathResult<()> {
        if self.dim() != other.dim() {
            return Err(MathError::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            });
        }
        Ok(())
    }

    /// Return the component at `index`.
    pub fn get(&self, index: usize) -> MathResult<f64> {
        self.check_index(index)?;
        Ok(self.data[index])
    }

    /// Overwrite the component at `index`.
    pub fn set(&mut self, index: usize, value: f64) -> MathResult<()> {
        self.check_index(index)?;
        self.data[index] = value;
        Ok(())
    }

    /// Element-wise sum.
    pub fn try_add(&self, other: &Vector) -> MathResult<Vector> {
        self.check_dim(other)?;
        Ok(Vector {
            data: &self.data + &other.data,
        })
    }

    /// Element-wise difference.
    pub fn try_sub(&self, other: &Vector) -> MathResult<Vector> {
        self.check_dim(other)?;
        Ok(Vector {
            data: &self.data - &other.data,
        })
    }

    /// Multiply every component by `k`.
    pub fn scale(&self, k: f64) -> Vector {
        Vector {
            data: &self.data * k,
        }
    }

    /// Inner product of two vectors of equal dimension.
    pub fn dot(&self, other: &Vector) -> MathResult<f64> {
        self.check_dim(other)?;
        Ok(self.data.dot(&other.data))
    }

    pub fn norm_squared(&self) -> f64 {
        self.data.dot(&self.data)
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// The vector scaled to unit length.
    pub fn unit(&self) -> MathResult<Vector> {
        let norm = self.norm();
        if norm == 0.0_f64 {
            return Err(MathError::ZeroVector);
        }
        Ok(self.scale(1.0_f64 / norm))
    }

    /// Return a copy with the component at `index` shifted by `delta`.
    ///
    /// This is the building block of every finite difference stencil.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multivariable::linalg::Vector;
    /// let v = Vector::try_new(vec![1.0, 2.0]).unwrap();
    /// let u = v.perturb(1, 0.5).unwrap();
    /// assert_eq!(u.to_vec(), vec![1.0, 2.5]);
    /// assert_eq!(v.to_vec(), vec![1.0, 2.0]);
    /// ```
    pub fn perturb(&self, index: usize, delta: f64) -> MathResult<Vector> {
        self.check_index(index)?;
        let mut data = self.data.clone();
        data[index] += delta;
        Ok(Vector { data })
    }

    /// Compare components within an absolute tolerance.
    pub fn is_close(&self, other: &Vector, abs_tol: f64) -> bool {
        self.dim() == other.dim()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).abs() <= abs_tol)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.data.iter().join(", "))
    }
}
