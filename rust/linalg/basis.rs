use crate::error::MathResult;
use crate::linalg::matrix::Matrix;
use crate::linalg::solver::{rref, Reduction};
use crate::linalg::vector::Vector;
use log::debug;
use ndarray::Array1;

/// Construct a basis for the null space of `a`, one vector per free column.
///
/// Each vector sets its own free variable to 1, every other free variable to 0, and
/// reads the pivot variables off the reduced row-echelon form: for a pivot column `p`
/// with pivot row `r`, component `p` is `-RREF[r][f]`. Vectors are ordered by the index
/// of their free column. A matrix with no free columns has the empty basis.
///
/// # Examples
///
/// ```rust
/// # use multivariable::linalg::{find_null_space_basis, Matrix};
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]]).unwrap();
/// let basis = find_null_space_basis(&a);
/// assert_eq!(basis.len(), 2);
/// assert_eq!(basis[0].to_vec(), vec![-2.0, 1.0, 0.0]);
/// ```
pub fn find_null_space_basis(a: &Matrix) -> Vec<Vector> {
    let reduction = rref(a);
    let basis = basis_from_reduction(&reduction);
    debug!(
        "null space of {}x{} matrix has dimension {}",
        a.nrows(),
        a.ncols(),
        basis.len()
    );
    basis
}

fn basis_from_reduction(reduction: &Reduction) -> Vec<Vector> {
    let rref = reduction.matrix();
    let n = rref.ncols();
    let pivots = reduction.pivot_columns();
    reduction
        .free_columns()
        .into_iter()
        .map(|f| {
            let mut x: Array1<f64> = Array1::zeros(n);
            x[f] = 1.0_f64;
            let column = &rref.columns()[f];
            for (p, r) in pivots.iter() {
                x[*p] = -column.data[*r];
            }
            Vector { data: x }
        })
        .collect()
}

/// Dimension of the null space, `ncols(a) - rank(a)`.
pub fn nullity(a: &Matrix) -> usize {
    rref(a).free_columns().len()
}

/// Check that `v` lies in the null space of `a` within `abs_tol`.
pub fn in_null_space(a: &Matrix, v: &Vector, abs_tol: f64) -> MathResult<bool> {
    let av = a.mul_vector(v)?;
    let is_zero = av.iter().all(|x| x.abs() <= abs_tol);
    Ok(is_zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;

    #[test]
    fn trivial_null_space() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert!(find_null_space_basis(&a).is_empty());
        assert_eq!(nullity(&a), 0);
    }

    #[test]
    fn zero_matrix_gives_standard_basis() {
        let a = Matrix::zeros(2, 3).unwrap();
        let basis = find_null_space_basis(&a);
        assert_eq!(basis.len(), 3);
        for (i, v) in basis.iter().enumerate() {
            assert_eq!(v, &Vector::unit_basis(3, i).unwrap());
        }
    }

    #[test]
    fn basis_vectors_solve_homogeneous_system() {
        let a = Matrix::from_rows(vec![
            vec![1.0, 0.0, 2.0, -1.0],
            vec![0.0, 1.0, 1.0, 3.0],
        ])
        .unwrap();
        let basis = find_null_space_basis(&a);
        assert_eq!(basis.len(), 2);
        assert_eq!(basis[0].to_vec(), vec![-2.0, -1.0, 1.0, 0.0]);
        assert_eq!(basis[1].to_vec(), vec![1.0, -3.0, 0.0, 1.0]);
        for v in basis.iter() {
            assert!(in_null_space(&a, v, 1e-12).unwrap());
        }
    }

    #[test]
    fn in_null_space_respects_tolerance() {
        let a = Matrix::from_rows(vec![vec![1.0, 1.0]]).unwrap();
        let near = Vector::try_new(vec![1.0, -1.0 + 1e-10]).unwrap();
        assert!(in_null_space(&a, &near, 1e-9).unwrap());
        assert!(!in_null_space(&a, &near, 1e-12).unwrap());
        let far = Vector::try_new(vec![1.0, 1.0]).unwrap();
        assert!(!in_null_space(&a, &far, 1e-9).unwrap());
    }

    #[test]
    fn in_null_space_checks_dimension() {
        let a = Matrix::identity(2).unwrap();
        let v = Vector::try_new(vec![1.0]).unwrap();
        assert!(matches!(
            in_null_space(&a, &v, 1e-9),
            Err(MathError::DimensionMismatch { .. })
        ));
    }
}
