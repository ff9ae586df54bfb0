use crate::linalg::{
    find_null_space_basis, in_null_space, nullity, rank, rref, ColumnKind, Matrix, Vector,
};

fn sample() -> Matrix {
    Matrix::try_new(vec![
        Vector::try_new(vec![1., -3., 2.]).unwrap(),
        Vector::try_new(vec![-2., 6., -4.]).unwrap(),
        Vector::try_new(vec![2., -1., 5.]).unwrap(),
        Vector::try_new(vec![3., 1., 8.]).unwrap(),
        Vector::try_new(vec![-1., -7., -4.]).unwrap(),
    ])
    .unwrap()
}

#[test]
fn sample_matrix_basis() {
    let a = sample();
    assert_eq!(rank(&a), 2);
    let basis = find_null_space_basis(&a);
    assert_eq!(basis.len(), 3);
    assert_eq!(basis.len(), a.ncols() - rank(&a));
    for v in basis.iter() {
        assert_eq!(v.dim(), 5);
        assert!(in_null_space(&a, v, 1e-9).unwrap());
    }
}

#[test]
fn sample_matrix_basis_is_independent() {
    let a = sample();
    let basis = find_null_space_basis(&a);
    let b = Matrix::try_new(basis).unwrap();
    assert_eq!(rank(&b), 3);
}

#[test]
fn sample_matrix_free_variables() {
    // column 1 is -2 x column 0, so x2 is free; x4 and x5 follow from the reduction
    let reduction = rref(&sample());
    assert_eq!(reduction.free_columns(), vec![1, 3, 4]);
    let basis = find_null_space_basis(&sample());
    for (k, f) in [1_usize, 3, 4].iter().enumerate() {
        for g in [1_usize, 3, 4].iter() {
            let expected = if f == g { 1.0 } else { 0.0 };
            assert_eq!(basis[k].get(*g).unwrap(), expected);
        }
    }
}

#[test]
fn rref_pivot_structure() {
    let a = Matrix::from_rows(vec![
        vec![0., 2., 4., 1.],
        vec![1., 1., 1., 0.],
        vec![2., 4., 6., 1.],
    ])
    .unwrap();
    let reduction = rref(&a);
    let r = reduction.matrix();
    let pivots = reduction.pivot_columns();

    // each pivot column is a unit vector with its 1 in the pivot row
    for (col, row) in pivots.iter() {
        for i in 0..r.nrows() {
            let expected = if i == *row { 1.0 } else { 0.0 };
            assert_eq!(r.get(i, *col).unwrap(), expected);
        }
    }
    // pivot rows strictly increase with the column index
    for w in pivots.windows(2) {
        assert!(w[0].1 < w[1].1);
    }
    assert_eq!(reduction.rank(), pivots.len());
    assert_eq!(nullity(&a), a.ncols() - reduction.rank());
    assert_eq!(
        reduction.column_kinds().len(),
        a.ncols(),
        "every column is classified"
    );
}

#[test]
fn wide_zero_column_is_free() {
    let a = Matrix::from_rows(vec![vec![0., 1.], vec![0., 2.]]).unwrap();
    let reduction = rref(&a);
    assert_eq!(
        reduction.column_kinds(),
        &[ColumnKind::Free, ColumnKind::Pivot(0)]
    );
    let basis = find_null_space_basis(&a);
    assert_eq!(basis, vec![Vector::try_new(vec![1., 0.]).unwrap()]);
}
