//! Fault extraction from a response envelope
//!
//! The envelope's `error` field is only interpreted when a caller asks for it.
//! Extraction is deliberately forgiving once an error object is known to
//! exist: a field of the wrong type keeps its default rather than failing the
//! whole extraction, so "the daemon reported a fault" is never hidden behind
//! a lower-level decode error. The decode problem is logged at `warn`.

use crate::error::{Error, Result, RpcFault};
use crate::types::RpcResponse;
use serde_json::{Map, Value};

impl RpcResponse {
    /// Extract the daemon-reported fault
    ///
    /// # Errors
    ///
    /// - [`Error::NoFaultPresent`] when `error` is absent or null
    /// - [`Error::MalformedFault`] when `error` is not a JSON object
    ///
    /// # Examples
    ///
    /// ```rust
    /// use daemonrpc_core::RpcResponse;
    /// use serde_json::json;
    ///
    /// let response = RpcResponse::new(None, Some(json!({"code": -1, "message": "x"})), "1");
    /// let fault = response.fault().unwrap();
    /// assert_eq!(fault.code, -1);
    /// assert_eq!(fault.message, "x");
    /// ```
    pub fn fault(&self) -> Result<RpcFault> {
        match self.error.as_ref() {
            None => Err(Error::NoFaultPresent),
            Some(Value::Object(fields)) => Ok(decode_fault(fields)),
            Some(other) => Err(Error::MalformedFault(other.clone())),
        }
    }
}

fn decode_fault(fields: &Map<String, Value>) -> RpcFault {
    match serde_json::from_value::<RpcFault>(Value::Object(fields.clone())) {
        Ok(fault) => fault,
        Err(err) => {
            tracing::warn!(error = %err, fault = ?fields, "Fault object did not decode cleanly");
            RpcFault {
                code: fields.get("code").and_then(Value::as_i64).unwrap_or_default(),
                message: fields
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }
        }
    }
}
