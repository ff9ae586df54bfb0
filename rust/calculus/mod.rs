//! Numerical differential operators on functions between real vector spaces.
//!
//! An [MFunction] wraps an evaluation rule `R^n -> R^m`. Every operator is estimated
//! with fixed-step central differences from [stencil], and applies only to functions of
//! a suitable shape; otherwise it fails with
//! [MathError::NotSupported](crate::error::MathError::NotSupported).
//!
//! | Operator | Requires |
//! |----------|----------|
//! | partial derivatives, Jacobian | any `n >= 2`, Jacobian also for curves |
//! | gradient, directional derivative | `m == 1` |
//! | Hessian, Laplacian | `m == 1` and `n >= 2` |
//! | divergence | `n == m >= 2` |
//! | curl | `n == m` in 2 or 3 dimensions |
//! | curvature, unit tangent, principal unit normal | `n == 1` |

#[cfg(feature = "python")]
pub(crate) mod calculus_py;
pub mod mfunction;
pub mod stencil;

pub use crate::calculus::mfunction::{Curl, MFunction};
pub use crate::calculus::stencil::{FIRST_ORDER_STEP, SECOND_ORDER_STEP};
