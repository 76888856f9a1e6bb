//! Envelope encoding and decoding
//!
//! Thin wrappers over serde_json that know about the two envelope shapes:
//!
//! - Encoding maps failures to [`Error::Serialization`]; nothing has been
//!   sent yet, so there is no transport context to attach.
//! - Response decoding hands back the raw `serde_json::Error`, because the
//!   caller folds it into a [`crate::TransportFault`] together with the HTTP
//!   status and ids.
//! - [`salvage_response`] recovers whatever envelope fields it can from a body
//!   that failed strict decoding, so a failed call still exposes them.
//!
//! # Examples
//!
//! ```rust
//! use daemonrpc_core::{codec, RpcRequest};
//!
//! let params = codec::positional_params(("2dcmTfm7E", 6)).unwrap();
//! let request = RpcRequest::new("listunspent", params, "1");
//! let json = codec::encode_request(&request).unwrap();
//! assert!(json.contains(r#""params":["2dcmTfm7E",6]"#));
//! ```

use crate::error::{Error, Result};
use crate::types::{RpcRequest, RpcResponse};
use serde::Serialize;
use serde_json::Value;

/// Encode any serializable value to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a request envelope
pub fn encode_request(req: &RpcRequest) -> Result<String> {
    encode(req)
}

/// Turn caller-supplied parameters into the positional list
///
/// Anything that serializes to a JSON array is accepted as-is, which covers
/// tuples, `Vec`s and `json!([...])`. Unit and `null` become the empty list.
/// Any other shape is rejected, since daemons in this family only take
/// positional parameters.
pub fn positional_params<P: Serialize>(params: P) -> Result<Vec<Value>> {
    match serde_json::to_value(params).map_err(|e| Error::Serialization(e.to_string()))? {
        Value::Array(values) => Ok(values),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::Serialization(format!(
            "positional parameters must encode to a JSON array, got {}",
            other
        ))),
    }
}

/// Strictly decode a response envelope
pub fn decode_response(data: &[u8]) -> serde_json::Result<RpcResponse> {
    serde_json::from_slice(data)
}

/// Best-effort recovery of envelope fields from a body that failed to decode
///
/// Each field is taken independently when it has the expected type; anything
/// else is left at its default. Bodies that are not JSON objects at all yield
/// an empty envelope.
pub fn salvage_response(data: &[u8]) -> RpcResponse {
    let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(data) else {
        return RpcResponse::default();
    };

    let non_null = |value: Option<Value>| value.filter(|v| !v.is_null());

    RpcResponse {
        result: non_null(fields.remove("result")),
        error: non_null(fields.remove("error")),
        id: match fields.remove("id") {
            Some(Value::String(id)) => id,
            _ => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_positional_params_from_tuple() {
        let params = positional_params(("addr", 1, true)).unwrap();
        assert_eq!(params, vec![json!("addr"), json!(1), json!(true)]);
    }

    #[test]
    fn test_positional_params_from_unit_is_empty() {
        assert!(positional_params(()).unwrap().is_empty());
        assert!(positional_params(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_positional_params_from_vec() {
        let params = positional_params(vec![json!({"txid": "ab", "vout": 0})]).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0]["vout"], 0);
    }

    #[test]
    fn test_positional_params_rejects_objects() {
        let result = positional_params(json!({"named": 1}));
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_positional_params_rejects_bare_scalars() {
        assert!(positional_params("just a string").is_err());
    }

    #[test]
    fn test_encode_request_field_names() {
        let request = RpcRequest::new("getnewaddress", Vec::new(), "3");
        let encoded = encode_request(&request).unwrap();

        assert!(encoded.contains("\"jsonrpc\":\"1.0\""));
        assert!(encoded.contains("\"id\":\"3\""));
        assert!(encoded.contains("\"method\":\"getnewaddress\""));
    }

    #[test]
    fn test_decode_response_success() {
        let response = decode_response(br#"{"result":"txid","error":null,"id":"5"}"#).unwrap();
        assert_eq!(response.result, Some(json!("txid")));
        assert_eq!(response.id, "5");
    }

    #[test]
    fn test_decode_response_rejects_html() {
        assert!(decode_response(b"<html>401 Unauthorized</html>").is_err());
    }

    #[test]
    fn test_salvage_keeps_readable_fields() {
        // numeric id breaks strict decoding, result/error survive
        let body = br#"{"result":{"a":1},"error":null,"id":12}"#;
        assert!(decode_response(body).is_err());

        let response = salvage_response(body);
        assert_eq!(response.result, Some(json!({"a": 1})));
        assert!(response.error.is_none());
        assert_eq!(response.id, "");
    }

    #[test]
    fn test_salvage_non_json_is_empty() {
        assert_eq!(salvage_response(b""), RpcResponse::default());
        assert_eq!(salvage_response(b"[1,2]"), RpcResponse::default());
    }
}
