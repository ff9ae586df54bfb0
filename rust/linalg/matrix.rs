use crate::error::{MathError, MathResult};
use crate::json::JSON;
use crate::linalg::solver::{inverse, rref, Reduction};
use crate::linalg::vector::Vector;
use itertools::Itertools;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular matrix stored as an ordered sequence of column [`Vector`]s.
///
/// Matrices are never mutated after construction; every transformation returns a new
/// instance.
#[cfg_attr(feature = "python", pyo3::pyclass(module = "multivariable.rs"))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixDataModel")]
pub struct Matrix {
    columns: Vec<Vector>,
}

#[derive(Deserialize)]
struct MatrixDataModel {
    columns: Vec<Vector>,
}

impl TryFrom<MatrixDataModel> for Matrix {
    type Error = MathError;

    fn try_from(model: MatrixDataModel) -> Result<Self, Self::Error> {
        Matrix::try_new(model.columns)
    }
}

impl JSON for Matrix {}

impl Matrix {
    /// Create a `Matrix` from its column vectors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use multivariable::linalg::{Matrix, Vector};
    /// let a = Matrix::try_new(vec![
    ///     Vector::try_new(vec![1.0, 3.0]).unwrap(),
    ///     Vector::try_new(vec![2.0, 4.0]).unwrap(),
    /// ]).unwrap();
    /// assert_eq!(a.get(0, 1).unwrap(), 2.0);
    /// assert_eq!(a.trace().unwrap(), 5.0);
    /// ```
    pub fn try_new(columns: Vec<Vector>) -> MathResult<Self> {
        let Some(first) = columns.first() else {
            return Err(MathError::InvalidShape(
                "a matrix must have at least one column".to_string(),
            ));
        };
        let rows = first.dim();
        if let Some(col) = columns.iter().find(|c| c.dim() != rows) {
            return Err(MathError::DimensionMismatch {
                expected: rows,
                found: col.dim(),
            });
        }
        Ok(Self { columns })
    }

    /// Create a `Matrix` from row-major input, one inner `Vec` per row.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> MathResult<Self> {
        let Some(first) = rows.first() else {
            return Err(MathError::InvalidShape(
                "a matrix must have at least one row".to_string(),
            ));
        };
        let ncols = first.len();
        if let Some(row) = rows.iter().find(|r| r.len() != ncols) {
            return Err(MathError::DimensionMismatch {
                expected: ncols,
                found: row.len(),
            });
        }
        let columns = (0..ncols)
            .map(|j| Vector::try_new(rows.iter().map(|r| r[j]).collect()))
            .collect::<MathResult<Vec<Vector>>>()?;
        Self::try_new(columns)
    }

    /// The `n` x `n` identity matrix.
    pub fn identity(n: usize) -> MathResult<Self> {
        Self::try_new(
            (0..n)
                .map(|i| Vector::unit_basis(n, i))
                .collect::<MathResult<Vec<Vector>>>()?,
        )
    }

    pub fn zeros(rows: usize, cols: usize) -> MathResult<Self> {
        Self::try_new(
            (0..cols)
                .map(|_| Vector::zeros(rows))
                .collect::<MathResult<Vec<Vector>>>()?,
        )
    }

    /// Build from a row-major 2d-array.
    ///
    /// The caller guarantees at least one row and one column, which holds for any array
    /// produced by [`Matrix::to_array2`].
    pub(crate) fn from_array2(a: &ArrayView2<f64>) -> Self {
        Self {
            columns: a
                .axis_iter(Axis(1))
                .map(|col| Vector {
                    data: col.to_owned(),
                })
                .collect(),
        }
    }

    /// Copy into a row-major 2d-array.
    pub(crate) fn to_array2(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.nrows(), self.ncols()), |(i, j)| {
            self.columns[j].data[i]
        })
    }

    pub fn nrows(&self) -> usize {
        self.columns[0].dim()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn columns(&self) -> &[Vector] {
        &self.columns
    }

    /// Return the element at (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> MathResult<f64> {
        self.column(col)?.get(row)
    }

    pub fn column(&self, col: usize) -> MathResult<&Vector> {
        self.columns.get(col).ok_or(MathError::IndexOutOfRange {
            index: col,
            len: self.ncols(),
        })
    }

    pub fn row(&self, row: usize) -> MathResult<Vector> {
        if row >= self.nrows() {
            return Err(MathError::IndexOutOfRange {
                index: row,
                len: self.nrows(),
            });
        }
        Vector::from_array(Array1::from_iter(self.columns.iter().map(|c| c.data[row])))
    }

    /// Swap rows and columns.
    ///
    /// Column `j` of the result is row `j` of `self`, collected across every column.
    pub fn transpose(&self) -> Matrix {
        let columns = (0..self.nrows())
            .map(|i| Vector {
                data: Array1::from_iter(self.columns.iter().map(|c| c.data[i])),
            })
            .collect();
        Matrix { columns }
    }

    /// Sum of the diagonal entries of a square matrix.
    pub fn trace(&self) -> MathResult<f64> {
        if !self.is_square() {
            return Err(MathError::NotSquare {
                rows: self.nrows(),
                cols: self.ncols(),
            });
        }
        Ok(self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| c.data[i])
            .sum())
    }

    fn check_same_shape(&self, other: &Matrix) -> MathResult<()> {
        if self.nrows() != other.nrows() {
            return Err(MathError::DimensionMismatch {
                expected: self.nrows(),
                found: other.nrows(),
            });
        }
        if self.ncols() != other.ncols() {
            return Err(MathError::DimensionMismatch {
                expected: self.ncols(),
                found: other.ncols(),
            });
        }
        Ok(())
    }

    pub fn try_add(&self, other: &Matrix) -> MathResult<Matrix> {
        self.check_same_shape(other)?;
        Matrix::try_new(
            self.columns
                .iter()
                .zip(other.columns.iter())
                .map(|(a, b)| a.try_add(b))
                .collect::<MathResult<Vec<Vector>>>()?,
        )
    }

    pub fn try_sub(&self, other: &Matrix) -> MathResult<Matrix> {
        self.check_same_shape(other)?;
        Matrix::try_new(
            self.columns
                .iter()
                .zip(other.columns.iter())
                .map(|(a, b)| a.try_sub(b))
                .collect::<MathResult<Vec<Vector>>>()?,
        )
    }

    pub fn scale(&self, k: f64) -> Matrix {
        Matrix {
            columns: self.columns.iter().map(|c| c.scale(k)).collect(),
        }
    }

    /// Matrix-vector product `A v`, a linear combination of the columns of `A`.
    pub fn mul_vector(&self, v: &Vector) -> MathResult<Vector> {
        if v.dim() != self.ncols() {
            return Err(MathError::DimensionMismatch {
                expected: self.ncols(),
                found: v.dim(),
            });
        }
        let mut out: Array1<f64> = Array1::zeros(self.nrows());
        for (col, x) in self.columns.iter().zip(v.iter()) {
            out.scaled_add(*x, &col.data);
        }
        Vector::from_array(out)
    }

    /// Matrix product `A B`.
    pub fn mul_matrix(&self, other: &Matrix) -> MathResult<Matrix> {
        if other.nrows() != self.ncols() {
            return Err(MathError::DimensionMismatch {
                expected: self.ncols(),
                found: other.nrows(),
            });
        }
        Matrix::try_new(
            other
                .columns
                .iter()
                .map(|c| self.mul_vector(c))
                .collect::<MathResult<Vec<Vector>>>()?,
        )
    }

    /// Append a column on the right, e.g. the right hand side of `A x = b`.
    pub fn augment(&self, v: &Vector) -> MathResult<Matrix> {
        let mut columns = self.columns.clone();
        columns.push(v.clone());
        Matrix::try_new(columns)
    }

    /// Append every column of `other` on the right, forming `[A | B]`.
    pub fn augment_matrix(&self, other: &Matrix) -> MathResult<Matrix> {
        Matrix::try_new(
            self.columns
                .iter()
                .chain(other.columns.iter())
                .cloned()
                .collect(),
        )
    }

    /// Reduced row-echelon form with the pivot/free classification of each column.
    pub fn rref(&self) -> Reduction {
        rref(self)
    }

    pub fn rank(&self) -> usize {
        rref(self).rank()
    }

    /// Inverse of a square, non-singular matrix.
    pub fn inverse(&self) -> MathResult<Matrix> {
        inverse(self)
    }

    /// Compare entries within an absolute tolerance.
    pub fn is_close(&self, other: &Matrix, abs_tol: f64) -> bool {
        self.ncols() == other.ncols()
            && self
                .columns
                .iter()
                .zip(other.columns.iter())
                .all(|(a, b)| a.is_close(b, abs_tol))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = (0..self.nrows())
            .map(|i| format!("[{}]", self.columns.iter().map(|c| c.data[i]).join(", ")))
            .join("\n");
        write!(f, "{}", rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(values: &[f64]) -> Vector {
        Vector::try_new(values.to_vec()).unwrap()
    }

    #[test]
    fn construction_errors() {
        assert!(matches!(
            Matrix::try_new(vec![]),
            Err(MathError::InvalidShape(_))
        ));
        assert_eq!(
            Matrix::try_new(vec![v(&[1.0, 2.0]), v(&[1.0])]),
            Err(MathError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
        assert!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn shape_and_access() {
        let a = Matrix::try_new(vec![v(&[1.0, 2.0, 3.0]), v(&[4.0, 5.0, 6.0])]).unwrap();
        assert_eq!(a.nrows(), 3);
        assert_eq!(a.ncols(), 2);
        assert_eq!(a.get(2, 1).unwrap(), 6.0);
        assert_eq!(a.row(1).unwrap().to_vec(), vec![2.0, 5.0]);
        assert_eq!(
            a.get(0, 2),
            Err(MathError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(a.get(3, 0).is_err());
        assert!(a.row(3).is_err());
    }

    #[test]
    fn from_rows_matches_columns() {
        let a = Matrix::from_rows(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]).unwrap();
        let b = Matrix::try_new(vec![v(&[1.0, 2.0, 3.0]), v(&[4.0, 5.0, 6.0])]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn transpose() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = a.transpose();
        assert_eq!(t.nrows(), 3);
        assert_eq!(t.ncols(), 2);
        assert_eq!(t.column(1).unwrap().to_vec(), vec![4.0, 5.0, 6.0]);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn trace() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(a.trace().unwrap(), 5.0);
        let b = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(b.trace(), Err(MathError::NotSquare { rows: 1, cols: 3 }));
    }

    #[test]
    fn products() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let x = v(&[1.0, -1.0]);
        assert_eq!(a.mul_vector(&x).unwrap().to_vec(), vec![-1.0, -1.0]);
        assert!(a.mul_vector(&v(&[1.0])).is_err());

        let b = Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let expected = Matrix::from_rows(vec![vec![2.0, 1.0], vec![4.0, 3.0]]).unwrap();
        assert_eq!(a.mul_matrix(&b).unwrap(), expected);
        assert_eq!(a.mul_matrix(&Matrix::identity(2).unwrap()).unwrap(), a);

        let c = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(a.mul_matrix(&c).is_err());
    }

    #[test]
    fn elementwise() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let i = Matrix::identity(2).unwrap();
        let expected = Matrix::from_rows(vec![vec![2.0, 2.0], vec![3.0, 5.0]]).unwrap();
        assert_eq!(a.try_add(&i).unwrap(), expected);
        assert_eq!(a.try_add(&i).unwrap().try_sub(&i).unwrap(), a);
        assert_eq!(a.scale(0.0), Matrix::zeros(2, 2).unwrap());
        assert!(a.try_add(&Matrix::identity(3).unwrap()).is_err());
    }

    #[test]
    fn augment() {
        let a = Matrix::identity(2).unwrap();
        let ab = a.augment(&v(&[5.0, 6.0])).unwrap();
        assert_eq!(ab.ncols(), 3);
        assert_eq!(ab.get(1, 2).unwrap(), 6.0);
        assert!(a.augment(&v(&[1.0])).is_err());
        let ai = a.augment_matrix(&a).unwrap();
        assert_eq!(ai.ncols(), 4);
    }

    #[test]
    fn array2_round_trip() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let arr = a.to_array2();
        assert_eq!(arr[[1, 0]], 4.0);
        assert_eq!(Matrix::from_array2(&arr.view()), a);
    }

    #[test]
    fn display() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(format!("{}", a), "[1, 2]\n[3, 4]");
    }

    #[test]
    fn json_revalidates_shape() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let json = a.to_json().unwrap();
        assert_eq!(Matrix::from_json(&json).unwrap(), a);
        let ragged = "{\"columns\":[{\"data\":{\"v\":1,\"dim\":[2],\"data\":[1.0,2.0]}},{\"data\":{\"v\":1,\"dim\":[1],\"data\":[1.0]}}]}";
        assert!(Matrix::from_json(ragged).is_err());
    }
}
