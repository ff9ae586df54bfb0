//! Operator overloads for [`Vector`].
//!
//! The binary `+` and `-` operators are checked like [`Vector::try_add`] and
//! [`Vector::try_sub`] and return a [`MathResult`], failing with
//! [`MathError::DimensionMismatch`](crate::error::MathError::DimensionMismatch) when the
//! dimensions differ.

use crate::error::MathResult;
use crate::linalg::vector::Vector;
use auto_ops::{impl_op, impl_op_ex, impl_op_ex_commutative};

// Add
impl_op_ex!(+|a: &Vector, b: &Vector| -> MathResult<Vector> { a.try_add(b) });

// Sub
impl_op_ex!(-|a: &Vector, b: &Vector| -> MathResult<Vector> { a.try_sub(b) });

// Mul
impl_op_ex_commutative!(*|a: &Vector, b: &f64| -> Vector {
    Vector {
        data: &a.data * *b,
    }
});

// Neg
impl_op!(-|a: Vector| -> Vector { Vector { data: -a.data } });
impl_op!(-|a: &Vector| -> Vector {
    Vector {
        data: &a.data * -1.0,
    }
});
