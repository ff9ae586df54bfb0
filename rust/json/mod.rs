//! Allows serialization and deserialization to JSON, with the ``serde`` crate.

#[cfg(feature = "python")]
pub(crate) mod json_py;

use serde::{Deserialize, Serialize};
use serde_json;

/// Handles the `to` and `from` JSON conversion.
///
/// Types that validate an invariant on construction re-validate it when deserialized,
/// so `from_json` fails on malformed input rather than producing an invalid object.
pub trait JSON: Serialize + for<'de> Deserialize<'de> {
    /// Return a JSON string representing the object.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Create an object from a JSON string representation.
    fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
