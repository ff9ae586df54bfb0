//! Wrapper to allow de/serializable objects in Rust to be passed to/from Python using pyo3
//! bindings.
//!
//! Any pyclass that is serializable is added as a DeserializedObj and then converted to JSON.
//! Having been deserialized it is matched, unpacked and passed back to Python.

use crate::json::JSON;
use crate::linalg::{Matrix, Vector};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Container for the Python exposed Rust objects which are deserializable.
///
/// This allows a single `from_json` function to detect the type and convert it directly
/// to a usable type in Python.
#[derive(Serialize, Deserialize, FromPyObject, IntoPyObject)]
pub(crate) enum DeserializedObj {
    Vector(Vector),
    Matrix(Matrix),
}

impl JSON for DeserializedObj {}

#[pyfunction]
#[pyo3(name = "from_json")]
pub(crate) fn from_json_py(_py: Python<'_>, json: &str) -> PyResult<DeserializedObj> {
    match DeserializedObj::from_json(json) {
        Ok(v) => Ok(v),
        Err(e) => Err(PyValueError::new_err(format!(
            "Could not create Class or Struct from given JSON.\n{}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_vector_json() {
        let x = Vector::try_new(vec![2.5]).unwrap();
        let json = DeserializedObj::Vector(x.clone()).to_json().unwrap();
        assert_eq!(
            json,
            "{\"Vector\":{\"data\":{\"v\":1,\"dim\":[1],\"data\":[2.5]}}}"
        );

        let y = DeserializedObj::from_json(&json).unwrap();
        match y {
            DeserializedObj::Vector(v) => assert_eq!(x, v),
            _ => assert!(false),
        }
    }

    #[test]
    fn malformed_matrix_is_rejected() {
        let json = "{\"Matrix\":{\"columns\":[]}}";
        assert!(DeserializedObj::from_json(json).is_err());
    }
}
