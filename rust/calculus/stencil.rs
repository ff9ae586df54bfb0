//! Fixed-step central finite difference stencils.
//!
//! Steps are constants; they are not adapted to the magnitude of the input or to the
//! local curvature of the function.

use crate::error::MathResult;
use crate::linalg::Vector;

/// Step used for first derivatives.
pub const FIRST_ORDER_STEP: f64 = 1e-10;

/// Step used for second derivatives and for nested differencing.
pub const SECOND_ORDER_STEP: f64 = 1e-5;

/// Central difference of `f` at `v` with respect to component `index`.
///
/// `(f(v + h e_i) - f(v - h e_i)) / 2h`
pub fn central_partial<F>(f: F, v: &Vector, index: usize, h: f64) -> MathResult<Vector>
where
    F: Fn(&Vector) -> MathResult<Vector>,
{
    let forward = f(&v.perturb(index, h)?)?;
    let backward = f(&v.perturb(index, -h)?)?;
    Ok(forward.try_sub(&backward)?.scale(0.5_f64 / h))
}

/// Four point midpoint estimate of the mixed partial with respect to `i` and `j`.
///
/// `[(f(+,+) + f(-,-)) - (f(+,-) + f(-,+))] / 4h^2`, which reduces to the
/// `f(x + 2h) - 2f(x) + f(x - 2h)` stencil when `i == j`.
pub fn mixed_partial<F>(f: F, v: &Vector, i: usize, j: usize, h: f64) -> MathResult<Vector>
where
    F: Fn(&Vector) -> MathResult<Vector>,
{
    let pp = f(&v.perturb(i, h)?.perturb(j, h)?)?;
    let mm = f(&v.perturb(i, -h)?.perturb(j, -h)?)?;
    let pm = f(&v.perturb(i, h)?.perturb(j, -h)?)?;
    let mp = f(&v.perturb(i, -h)?.perturb(j, h)?)?;
    let homogeneous = pp.try_add(&mm)?;
    let heterogeneous = pm.try_add(&mp)?;
    Ok(homogeneous
        .try_sub(&heterogeneous)?
        .scale(0.25_f64 / (h * h)))
}

/// Central difference of a curve `f` at parameter `t`.
pub fn central_derivative<F>(f: F, t: f64, h: f64) -> MathResult<Vector>
where
    F: Fn(f64) -> MathResult<Vector>,
{
    let forward = f(t + h)?;
    let backward = f(t - h)?;
    Ok(forward.try_sub(&backward)?.scale(0.5_f64 / h))
}

/// Central three point second difference of a curve `f` at parameter `t`.
pub fn central_second_derivative<F>(f: F, t: f64, h: f64) -> MathResult<Vector>
where
    F: Fn(f64) -> MathResult<Vector>,
{
    let forward = f(t + h)?;
    let centre = f(t)?;
    let backward = f(t - h)?;
    Ok(forward
        .try_add(&backward)?
        .try_sub(&centre.scale(2.0_f64))?
        .scale(1.0_f64 / (h * h)))
}
