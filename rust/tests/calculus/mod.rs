use crate::calculus::{Curl, MFunction};
use crate::linalg::{Matrix, Vector};

fn is_close(a: &f64, b: &f64, abs_tol: Option<f64>) -> bool {
    // used rather than equality for float numbers
    (a - b).abs() < abs_tol.unwrap_or(1e-8)
}

fn v(values: &[f64]) -> Vector {
    Vector::try_new(values.to_vec()).unwrap()
}

#[test]
fn gradient_is_transposed_jacobian() {
    let f = MFunction::scalar(3, |u: &Vector| {
        let (x, y, z) = (u.get(0).unwrap(), u.get(1).unwrap(), u.get(2).unwrap());
        x * y + y * z.sin()
    })
    .unwrap();
    let p = v(&[1.0, 2.0, 0.5]);
    let g = f.gradient_at(&p).unwrap();
    let j = f.jacobian_at(&p).unwrap();
    assert_eq!((j.nrows(), j.ncols()), (1, 3));
    for i in 0..3 {
        assert_eq!(g.get(i).unwrap(), j.get(0, i).unwrap());
    }
    let expected = v(&[2.0, 1.0 + 0.5_f64.sin(), 2.0 * 0.5_f64.cos()]);
    assert!(g.is_close(&expected, 1e-4));
}

#[test]
fn laplacian_is_hessian_trace() {
    let f = MFunction::scalar(3, |u: &Vector| {
        u.norm_squared() + u.get(0).unwrap() * u.get(2).unwrap()
    })
    .unwrap();
    let p = v(&[0.3, -1.0, 2.0]);
    let h = f.hessian_at(&p).unwrap();
    let expected =
        Matrix::from_rows(vec![vec![2., 0., 1.], vec![0., 2., 0.], vec![1., 0., 2.]]).unwrap();
    assert!(h.is_close(&expected, 1e-3));
    assert!(is_close(
        &f.laplacian_at(&p).unwrap(),
        &h.trace().unwrap(),
        Some(1e-12)
    ));
}

#[test]
fn divergence_is_jacobian_trace() {
    let f = MFunction::try_new(3, 3, |u: &Vector| {
        let (x, y, z) = (u.get(0).unwrap(), u.get(1).unwrap(), u.get(2).unwrap());
        Vector::try_new(vec![x * y, y * z, z * x]).unwrap()
    })
    .unwrap();
    let p = v(&[1.0, 2.0, 3.0]);
    // y + z + x
    assert!(is_close(&f.divergence_at(&p).unwrap(), &6.0, Some(1e-4)));
    match f.curl_at(&p).unwrap() {
        // (-y, -z, -x)
        Curl::Spatial(c) => assert!(c.is_close(&v(&[-2.0, -3.0, -1.0]), 1e-4)),
        other => panic!("expected a spatial curl, got {:?}", other),
    }
}

#[test]
fn helix_normal_points_to_axis() {
    let helix = MFunction::curve(3, |t: f64| {
        Vector::try_new(vec![t.cos(), t.sin(), t]).unwrap()
    })
    .unwrap();
    let t = 1.2_f64;
    // a helix of radius 1 and pitch 1 has curvature 1/2
    assert!(is_close(&helix.curvature_at(t).unwrap(), &0.5, Some(1e-4)));
    let n = helix.principal_unit_normal_at(t).unwrap();
    assert!(n.is_close(&v(&[-t.cos(), -t.sin(), 0.0]), 1e-4));
    let tangent = helix.unit_tangent_at(t).unwrap();
    assert!(is_close(&tangent.dot(&n).unwrap(), &0.0, Some(1e-4)));
}
