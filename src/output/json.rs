//! JSON output.

use serde::Serialize;

/// Pretty printed JSON of any serializable result.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
