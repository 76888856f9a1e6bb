//! Request and response envelopes
//!
//! Wallet and node daemons in the Bitcoin family speak a JSON-RPC 1.0
//! dialect over HTTP:
//!
//! ```text
//! -> {"jsonrpc":"1.0","id":"17","method":"getwalletinfo","params":[]}
//! <- {"result":{...},"error":null,"id":"17"}
//! ```
//!
//! The response's `result` and `error` are kept as untyped JSON values here.
//! The envelope is decoded before anyone knows which method it answers, so
//! committing to a shape is left to the coercion step (see [`crate::coerce`]).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Protocol version tag sent on every request
pub const JSONRPC_VERSION: &str = "1.0";

/// Outgoing request envelope
///
/// Method and params are passed through untouched; nothing here knows which
/// methods a daemon supports.
///
/// # Examples
///
/// ```rust
/// use daemonrpc_core::RpcRequest;
/// use serde_json::json;
///
/// let request = RpcRequest::new("validateaddress", vec![json!("2dcmTfm7E")], "42");
/// assert_eq!(request.jsonrpc, "1.0");
/// assert_eq!(request.id, "42");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version, always "1.0"
    pub jsonrpc: String,
    /// Correlation id echoed back by the daemon
    pub id: String,
    /// Name of the remote method
    pub method: String,
    /// Positional parameters, serialized as a JSON array (never omitted)
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Create a request envelope
    pub fn new(method: impl Into<String>, params: Vec<Value>, id: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// Incoming response envelope
///
/// `result` and `error` are `None` when the field is absent or JSON null.
/// Daemons normally populate exactly one of them, but that is not enforced
/// here; callers read whichever they need through the coercion helpers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Method-specific result payload
    #[serde(default)]
    pub result: Option<Value>,
    /// Daemon-reported error payload
    #[serde(default)]
    pub error: Option<Value>,
    /// Echoed correlation id (empty when absent or null)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
}

impl RpcResponse {
    /// Build an envelope by hand, mostly useful for tests and mocks
    pub fn new(result: Option<Value>, error: Option<Value>, id: impl Into<String>) -> Self {
        Self {
            result,
            error,
            id: id.into(),
        }
    }

    /// True when the envelope carries a non-null `result`
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// True when the envelope carries a non-null `error`
    pub fn has_fault(&self) -> bool {
        self.error.is_some()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = RpcRequest::new("getbalance", vec![json!("*"), json!(6)], "1700000000");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "jsonrpc": "1.0",
                "id": "1700000000",
                "method": "getbalance",
                "params": ["*", 6]
            })
        );
    }

    #[test]
    fn test_request_without_params_sends_empty_list() {
        let request = RpcRequest::new("getwalletinfo", Vec::new(), "1");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"params\":[]"));
    }

    #[test]
    fn test_response_null_fields_are_none() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"result":null,"error":null,"id":"9"}"#).unwrap();

        assert!(!response.has_result());
        assert!(!response.has_fault());
        assert_eq!(response.id, "9");
    }

    #[test]
    fn test_response_missing_fields_default() {
        let response: RpcResponse = serde_json::from_str(r#"{"result":true}"#).unwrap();

        assert_eq!(response.result, Some(json!(true)));
        assert!(response.error.is_none());
        assert_eq!(response.id, "");
    }

    #[test]
    fn test_response_null_id_is_empty() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"result":1,"error":null,"id":null}"#).unwrap();
        assert_eq!(response.id, "");
    }

    #[test]
    fn test_response_numeric_id_is_rejected() {
        let result = serde_json::from_str::<RpcResponse>(r#"{"result":1,"error":null,"id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_response_keeps_untyped_payloads() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"result":{"hex":"00","complete":true},"error":{"code":-8,"message":"m","extra":1},"id":"2"}"#,
        )
        .unwrap();

        assert!(response.has_result());
        assert!(response.has_fault());
        assert_eq!(response.error.unwrap()["extra"], 1);
    }
}
