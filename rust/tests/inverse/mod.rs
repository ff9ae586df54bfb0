use crate::error::MathError;
use crate::linalg::{inverse, solve, Matrix, Solution, Vector};

fn is_identity(m: &Matrix, abs_tol: f64) -> bool {
    m.is_close(&Matrix::identity(m.nrows()).unwrap(), abs_tol)
}

#[test]
fn inverse_round_trip() {
    let a = Matrix::from_rows(vec![
        vec![4., -2., 1.],
        vec![3., 6., -4.],
        vec![2., 1., 8.],
    ])
    .unwrap();
    let a_inv = inverse(&a).unwrap();
    assert!(is_identity(&a.mul_matrix(&a_inv).unwrap(), 1e-6));
    assert!(is_identity(&a_inv.mul_matrix(&a).unwrap(), 1e-6));
}

#[test]
fn inverse_needs_pivoting() {
    // zero leading entry forces a row swap
    let a = Matrix::from_rows(vec![vec![0., 1., 2.], vec![1., 0., 3.], vec![4., -3., 8.]])
        .unwrap();
    let a_inv = a.inverse().unwrap();
    assert!(is_identity(&a.mul_matrix(&a_inv).unwrap(), 1e-6));
}

#[test]
fn singular_and_rectangular() {
    let singular = Matrix::from_rows(vec![vec![1., 2.], vec![2., 4.]]).unwrap();
    assert_eq!(inverse(&singular), Err(MathError::Singular));
    let wide = Matrix::from_rows(vec![vec![1., 2., 3.]]).unwrap();
    assert_eq!(
        inverse(&wide),
        Err(MathError::NotSquare { rows: 1, cols: 3 })
    );
}

#[test]
fn solve_agrees_with_inverse() {
    let a = Matrix::from_rows(vec![vec![2., 1.], vec![1., 3.]]).unwrap();
    let b = Vector::try_new(vec![3., 5.]).unwrap();
    let x_inv = inverse(&a).unwrap().mul_vector(&b).unwrap();
    match solve(&a, &b).unwrap() {
        Solution::Unique(x) => assert!(x.is_close(&x_inv, 1e-9)),
        other => panic!("expected a unique solution, got {:?}", other),
    }
}
