//! Row reduction of matrices and the linear systems built on it.
//!
//! Every routine here runs Gauss-Jordan elimination with partial pivoting on a row-major
//! working copy and classifies each column as a pivot column or a free column.

use crate::error::{MathError, MathResult};
use crate::linalg::matrix::Matrix;
use crate::linalg::vector::Vector;
use log::{debug, trace};
use ndarray::prelude::*;
use ndarray::Zip;
use std::cmp::Ordering;

/// Magnitude at or below which a candidate pivot is treated as zero.
pub const PIVOT_TOLERANCE: f64 = 1e-9;

/// Classification of a column after row reduction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColumnKind {
    /// The column holds a leading 1 in the given row.
    Pivot(usize),
    /// The column has no pivot and parametrizes the null space.
    Free,
}

/// The reduced row-echelon form of a matrix with the classification of its columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Reduction {
    rref: Matrix,
    kinds: Vec<ColumnKind>,
}

impl Reduction {
    pub fn matrix(&self) -> &Matrix {
        &self.rref
    }

    pub fn column_kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    /// Number of pivot columns.
    pub fn rank(&self) -> usize {
        self.kinds
            .iter()
            .filter(|k| matches!(k, ColumnKind::Pivot(_)))
            .count()
    }

    /// Pairs of `(column, pivot row)` in increasing column order.
    pub fn pivot_columns(&self) -> Vec<(usize, usize)> {
        self.kinds
            .iter()
            .enumerate()
            .filter_map(|(j, k)| match k {
                ColumnKind::Pivot(r) => Some((j, *r)),
                ColumnKind::Free => None,
            })
            .collect()
    }

    /// Indices of the free columns in increasing order.
    pub fn free_columns(&self) -> Vec<usize> {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == ColumnKind::Free)
            .map(|(j, _)| j)
            .collect()
    }
}

/// Outcome of solving `A x = b`.
#[derive(Clone, Debug, PartialEq)]
pub enum Solution {
    /// Exactly one solution.
    Unique(Vector),
    /// Infinitely many solutions; `particular` sets every free variable to zero.
    Infinite {
        particular: Vector,
        free: Vec<usize>,
    },
    /// The reduced system contains a row `0 = 1`.
    Inconsistent,
}

/// Index of the element with largest absolute value.
pub(crate) fn argabsmax(a: ArrayView1<f64>) -> usize {
    a.iter()
        .zip(0..)
        .max_by(|x, y| {
            x.0.abs()
                .partial_cmp(&y.0.abs())
                .unwrap_or(Ordering::Equal)
        })
        .map(|(_, i)| i)
        .unwrap_or(0)
}

/// Swap rows `j` and `k` in place, where `j < k`.
fn row_swap<T>(p: &mut Array2<T>, j: usize, k: usize) {
    let (mut pt, mut pb) = p.view_mut().split_at(Axis(0), k);
    let (r1, r2) = (pt.row_mut(j), pb.row_mut(0));
    Zip::from(r1).and(r2).for_each(std::mem::swap);
}

fn reduce_in_place(a: &mut Array2<f64>) -> Vec<ColumnKind> {
    let (nrows, ncols) = a.dim();
    let mut kinds: Vec<ColumnKind> = Vec::with_capacity(ncols);
    let mut r: usize = 0;

    for j in 0..ncols {
        if r == nrows {
            kinds.push(ColumnKind::Free);
            continue;
        }
        let k = argabsmax(a.slice(s![r.., j])) + r;
        if a[[k, j]].abs() <= PIVOT_TOLERANCE {
            trace!("column {} has no pivot candidate above tolerance", j);
            kinds.push(ColumnKind::Free);
            continue;
        }
        if k != r {
            // row swap r <-> k (note that k > r by definition)
            row_swap(a, r, k);
        }
        let pivot = a[[r, j]];
        trace!("column {} pivots on row {} with value {}", j, r, pivot);
        a.row_mut(r).mapv_inplace(|x| x / pivot);
        a[[r, j]] = 1.0_f64;

        // eliminate column j from every other row, above and below
        let pivot_row = a.row(r).to_owned();
        for l in (0..nrows).filter(|l| *l != r) {
            let scl = a[[l, j]];
            if scl != 0.0_f64 {
                a.row_mut(l).scaled_add(-scl, &pivot_row);
            }
            a[[l, j]] = 0.0_f64;
        }
        kinds.push(ColumnKind::Pivot(r));
        r += 1;
    }
    kinds
}

/// Reduce a matrix to reduced row-echelon form.
///
/// # Examples
///
/// ```rust
/// # use multivariable::linalg::{rref, ColumnKind, Matrix};
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]]).unwrap();
/// let reduction = rref(&a);
/// assert_eq!(reduction.rank(), 1);
/// assert_eq!(
///     reduction.column_kinds(),
///     &[ColumnKind::Pivot(0), ColumnKind::Free, ColumnKind::Free]
/// );
/// ```
pub fn rref(a: &Matrix) -> Reduction {
    let mut arr = a.to_array2();
    let kinds = reduce_in_place(&mut arr);
    let reduction = Reduction {
        rref: Matrix::from_array2(&arr.view()),
        kinds,
    };
    debug!(
        "reduced {}x{} matrix to rank {}",
        a.nrows(),
        a.ncols(),
        reduction.rank()
    );
    reduction
}

/// Solve `A x = b` by reducing the augmented matrix `[A | b]`.
pub fn solve(a: &Matrix, b: &Vector) -> MathResult<Solution> {
    if b.dim() != a.nrows() {
        return Err(MathError::DimensionMismatch {
            expected: a.nrows(),
            found: b.dim(),
        });
    }
    let n = a.ncols();
    let reduction = rref(&a.augment(b)?);
    let kinds = reduction.column_kinds();
    if let ColumnKind::Pivot(_) = kinds[n] {
        return Ok(Solution::Inconsistent);
    }

    let rhs = reduction.matrix().column(n)?;
    let mut x: Array1<f64> = Array1::zeros(n);
    for (j, r) in reduction.pivot_columns() {
        x[j] = rhs.get(r)?;
    }
    let particular = Vector::from_array(x)?;
    let free: Vec<usize> = reduction
        .free_columns()
        .into_iter()
        .filter(|j| *j < n)
        .collect();
    if free.is_empty() {
        Ok(Solution::Unique(particular))
    } else {
        Ok(Solution::Infinite { particular, free })
    }
}

/// Invert a square matrix by reducing `[A | I]`.
///
/// # Examples
///
/// ```rust
/// # use multivariable::linalg::{inverse, Matrix};
/// let a = Matrix::from_rows(vec![vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
/// let a_inv = inverse(&a).unwrap();
/// let i = a.mul_matrix(&a_inv).unwrap();
/// assert!(i.is_close(&Matrix::identity(2).unwrap(), 1e-12));
/// ```
pub fn inverse(a: &Matrix) -> MathResult<Matrix> {
    if !a.is_square() {
        return Err(MathError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    let n = a.nrows();
    let reduction = rref(&a.augment_matrix(&Matrix::identity(n)?)?);
    if reduction.column_kinds()[..n]
        .iter()
        .any(|k| *k == ColumnKind::Free)
    {
        debug!("inverse requested for singular {}x{} matrix", n, n);
        return Err(MathError::Singular);
    }
    Matrix::try_new(reduction.matrix().columns()[n..].to_vec())
}

/// Number of pivot columns in the reduced row-echelon form.
pub fn rank(a: &Matrix) -> usize {
    rref(a).rank()
}
