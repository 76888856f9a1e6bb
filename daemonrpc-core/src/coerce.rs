//! Result coercion
//!
//! A response envelope is decoded before its method is known, so `result`
//! stays an untyped JSON value until the call site says what it expects.
//! Two kinds of coercion are offered:
//!
//! - **Typed**: [`RpcResponse::decode_result`] re-decodes an object or array
//!   result into any `DeserializeOwned` type (a record, a list of records, a
//!   map). Scalars are refused with [`Error::UnsupportedResultShape`].
//! - **Scalar**: [`RpcResponse::number`], [`RpcResponse::string`] and
//!   [`RpcResponse::boolean`] accept exactly one JSON kind each. There is no
//!   widening and null is a mismatch, not an absence.
//!
//! # Examples
//!
//! ```rust
//! use daemonrpc_core::{RpcResponse, Unspent};
//! use serde_json::json;
//!
//! let response = RpcResponse::new(Some(json!([{"txid": "abc", "vout": 2}])), None, "1");
//! let unspent: Vec<Unspent> = response.decode_result().unwrap();
//! assert_eq!(unspent[0].vout, 2);
//!
//! let response = RpcResponse::new(Some(json!(0.5)), None, "2");
//! assert_eq!(response.number().unwrap(), 0.5);
//! assert!(response.string().is_err());
//! ```

use crate::error::{Error, Result};
use crate::types::RpcResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Primitive result kinds the scalar coercers accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// JSON number, returned as `f64`
    Number,
    /// JSON string
    String,
    /// JSON `true`/`false`
    Bool,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Number => write!(f, "number"),
            ScalarKind::String => write!(f, "string"),
            ScalarKind::Bool => write!(f, "bool"),
        }
    }
}

/// A coerced value together with the envelope it came from
///
/// The envelope stays available for diagnostics (echoed id, a populated
/// `error` alongside the result).
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    /// The coerced result
    pub value: T,
    /// The full response envelope
    pub response: RpcResponse,
}

impl<T> Reply<T> {
    /// Drop the envelope and keep the value
    pub fn into_value(self) -> T {
        self.value
    }
}

impl RpcResponse {
    /// Decode an object or array `result` into `T`
    ///
    /// # Errors
    ///
    /// - [`Error::NoResultPresent`] when `result` is absent or null
    /// - [`Error::UnsupportedResultShape`] when `result` is a bare scalar
    /// - [`Error::Decode`] with the decoder's own error when `T` does not fit
    pub fn decode_result<T: DeserializeOwned>(&self) -> Result<T> {
        let result = self.result.as_ref().ok_or(Error::NoResultPresent)?;
        match result {
            Value::Object(_) | Value::Array(_) => Ok(serde_json::from_value(result.clone())?),
            other => Err(Error::UnsupportedResultShape(other.clone())),
        }
    }

    /// The `result` as a number
    pub fn number(&self) -> Result<f64> {
        match self.result_or_null() {
            Value::Number(n) => n.as_f64().ok_or_else(|| mismatch(ScalarKind::Number, self)),
            _ => Err(mismatch(ScalarKind::Number, self)),
        }
    }

    /// The `result` as a string
    pub fn string(&self) -> Result<String> {
        match self.result_or_null() {
            Value::String(s) => Ok(s.clone()),
            _ => Err(mismatch(ScalarKind::String, self)),
        }
    }

    /// The `result` as a bool
    pub fn boolean(&self) -> Result<bool> {
        match self.result_or_null() {
            Value::Bool(b) => Ok(*b),
            _ => Err(mismatch(ScalarKind::Bool, self)),
        }
    }

    /// Apply a coercion and keep the envelope either way
    ///
    /// On success the value is paired with this envelope in a [`Reply`]. On
    /// failure the error is wrapped in [`Error::Coercion`] together with this
    /// envelope, so a daemon error sent alongside a null result is not lost.
    pub fn into_reply<T, F>(self, coerce: F) -> Result<Reply<T>>
    where
        F: FnOnce(&RpcResponse) -> Result<T>,
    {
        match coerce(&self) {
            Ok(value) => Ok(Reply {
                value,
                response: self,
            }),
            Err(err) => Err(err.with_response(self)),
        }
    }

    fn result_or_null(&self) -> &Value {
        self.result.as_ref().unwrap_or(&Value::Null)
    }
}

fn mismatch(expected: ScalarKind, response: &RpcResponse) -> Error {
    Error::ResultTypeMismatch {
        expected,
        actual: response.result_or_null().clone(),
    }
}
