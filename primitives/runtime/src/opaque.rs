//! Opaque payloads.
//!
//! Schema nodes with no structure map to [`OpaqueValue`] in generated Rust
//! code. The wrapper deliberately hides the underlying JSON: callers must
//! either [`cast`](OpaqueValue::cast) into a concrete type (validated
//! deserialization) or explicitly unwrap the raw value, acknowledging that
//! no schema guarantees apply.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::result::ApiError;

/// An untyped payload carried through a typed API surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpaqueValue(serde_json::Value);

impl OpaqueValue {
    /// Wrap a raw JSON value.
    pub fn new(value: serde_json::Value) -> Self { Self(value) }

    /// Validated cast into a concrete type.
    ///
    /// # Errors
    /// [`ApiError::Deserialization`] if the payload does not conform to
    /// `T`.
    pub fn cast<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.0.clone())
            .map_err(|err| ApiError::Deserialization { detail: err.to_string() })
    }

    /// Give up the typed surface and take the raw JSON value.
    ///
    /// This is the explicit escape hatch: once called, the caller owns the
    /// consequences of structural access.
    pub fn into_raw(self) -> serde_json::Value { self.0 }
}

impl Default for OpaqueValue {
    fn default() -> Self { Self(serde_json::Value::Null) }
}
