//! Error types for daemonrpc
//!
//! This module defines the failure taxonomy shared by every daemonrpc crate:
//!
//! - **Error**: everything a call or a coercion can fail with (uses thiserror)
//! - **TransportFault**: the aggregated envelope-level failure of one round trip
//! - **RpcFault**: the structured error object returned by the daemon itself
//!
//! # Categories
//!
//! - **Transport**: `Transport`, `Connection`. The round trip itself failed.
//! - **Absence**: `NoResultPresent`, `NoFaultPresent`. The field the caller
//!   asked for was null. This is a normal outcome the caller branches on.
//! - **Shape**: `MalformedFault`, `UnsupportedResultShape`,
//!   `ResultTypeMismatch`. The field exists but the caller asked for the wrong
//!   kind of value for the method it called.
//! - **Decode**: the typed decoder's own error, passed through untouched.
//! - **Coercion**: any absence, shape or decode failure raised by a helper
//!   that sent the call itself, wrapped together with the response envelope
//!   so the daemon's `error` field stays reachable.
//!
//! # Examples
//!
//! ```rust
//! use daemonrpc_core::{Error, RpcResponse};
//! use serde_json::json;
//!
//! let response = RpcResponse::new(Some(json!(42)), None, "1");
//! match response.decode_result::<Vec<String>>() {
//!     Err(Error::UnsupportedResultShape(value)) => assert_eq!(value, json!(42)),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use crate::coerce::ScalarKind;
use crate::types::RpcResponse;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for daemonrpc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a daemonrpc call or coercion
///
/// Nothing in daemonrpc retries; every variant is reported as soon as it is
/// observed and the caller owns any retry decision.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The round trip completed but the envelope was not acceptable
    ///
    /// Raised when the body does not decode, the HTTP status is not 200, or
    /// the echoed correlation id differs. The fault carries whatever part of
    /// the envelope could be read.
    #[error(transparent)]
    Transport(Box<TransportFault>),

    /// The HTTP request never produced a response
    ///
    /// Connection refused, DNS failure, TLS failure or a body that could not
    /// be read to the end.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request envelope or its parameters could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The client handle could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// The response `result` is absent or null
    #[error("Response result is absent or null")]
    NoResultPresent,

    /// The response `error` is absent or null, so the call succeeded
    #[error("Response error is absent or null")]
    NoFaultPresent,

    /// The response `error` is present but is not a JSON object
    #[error("Response error is not a JSON object: {0}")]
    MalformedFault(serde_json::Value),

    /// The response `result` is a scalar where an object or array was required
    #[error("Response result is neither an object nor an array: {0}")]
    UnsupportedResultShape(serde_json::Value),

    /// The response `result` is not the requested scalar kind
    #[error("Response result is not a {expected}: {actual}")]
    ResultTypeMismatch {
        /// The scalar kind the caller asked for
        expected: ScalarKind,
        /// The value the daemon actually returned
        actual: serde_json::Value,
    },

    /// Decoding the result into the caller's type failed
    #[error(transparent)]
    Decode(Arc<serde_json::Error>),

    /// Coercing the result of a completed call failed
    ///
    /// Displays as the underlying failure. `response` is the accepted
    /// envelope, which may still carry a daemon error object.
    #[error("{source}")]
    Coercion {
        /// The absence, shape or decode failure
        source: Box<Error>,
        /// The envelope whose result could not be coerced
        response: Box<RpcResponse>,
    },
}

impl Error {
    /// Short stable label for the variant, used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Transport(_) => "transport",
            Error::Connection(_) => "connection",
            Error::Serialization(_) => "serialization",
            Error::Config(_) => "config",
            Error::NoResultPresent => "no_result",
            Error::NoFaultPresent => "no_fault",
            Error::MalformedFault(_) => "malformed_fault",
            Error::UnsupportedResultShape(_) => "unsupported_result_shape",
            Error::ResultTypeMismatch { .. } => "result_type_mismatch",
            Error::Decode(_) => "decode",
            Error::Coercion { source, .. } => source.kind(),
        }
    }

    /// The failure beneath any response envelope wrapping
    pub fn root(&self) -> &Error {
        match self {
            Error::Coercion { source, .. } => source.root(),
            other => other,
        }
    }

    /// The response envelope carried by this error, if any
    pub fn response(&self) -> Option<&RpcResponse> {
        match self {
            Error::Transport(fault) => Some(&fault.response),
            Error::Coercion { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }

    pub(crate) fn with_response(self, response: RpcResponse) -> Self {
        Error::Coercion {
            source: Box::new(self),
            response: Box::new(response),
        }
    }

    /// The transport fault, if this is one
    pub fn as_transport(&self) -> Option<&TransportFault> {
        match self {
            Error::Transport(fault) => Some(fault),
            _ => None,
        }
    }
}

impl From<TransportFault> for Error {
    fn from(fault: TransportFault) -> Self {
        Error::Transport(Box::new(fault))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(Arc::new(err))
    }
}

/// Aggregated failure of one envelope round trip
///
/// The three acceptance checks (envelope decodes, status is 200, ids match)
/// are evaluated together, so a single fault may describe more than one
/// problem. `response` holds the envelope as far as it could be decoded.
#[derive(Debug, Clone, Error)]
#[error(
    "transport fault: status={status}, error={}, body={body}, request_id={request_id}, response_id={response_id}",
    describe_decode_error(.decode_error)
)]
pub struct TransportFault {
    /// HTTP status code of the response
    pub status: u16,
    /// Why the body did not decode as a response envelope, if it didn't
    #[source]
    pub decode_error: Option<Arc<serde_json::Error>>,
    /// Raw response body
    pub body: String,
    /// Correlation id that was sent
    pub request_id: String,
    /// Correlation id that came back (empty when none could be read)
    pub response_id: String,
    /// The envelope as far as it could be decoded
    pub response: RpcResponse,
}

impl TransportFault {
    /// Whether the peer answered with 200 OK
    pub fn status_ok(&self) -> bool {
        self.status == 200
    }

    /// Whether the echoed correlation id matched the one sent
    pub fn id_matches(&self) -> bool {
        self.request_id == self.response_id
    }

    /// Whether the body decoded as a response envelope
    pub fn envelope_decoded(&self) -> bool {
        self.decode_error.is_none()
    }
}

fn describe_decode_error(err: &Option<Arc<serde_json::Error>>) -> String {
    match err {
        Some(err) => err.to_string(),
        None => "none".to_string(),
    }
}

/// Structured error object returned by the daemon
///
/// Bitcoin-style daemons report method failures in the envelope's `error`
/// field as `{"code": <int>, "message": <string>}`; extra fields are ignored.
///
/// ```rust
/// use daemonrpc_core::RpcFault;
///
/// let fault = RpcFault::new(-5, "Invalid address");
/// assert_eq!(fault.to_string(), "[-5] Invalid address");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcFault {
    /// Numeric error code chosen by the daemon
    pub code: i64,
    /// Human-readable description
    pub message: String,
}

impl RpcFault {
    /// Create a fault from its parts
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RpcFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RpcFault {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error as _;

    fn fault(status: u16, request_id: &str, response_id: &str) -> TransportFault {
        TransportFault {
            status,
            decode_error: None,
            body: "{}".to_string(),
            request_id: request_id.to_string(),
            response_id: response_id.to_string(),
            response: RpcResponse::default(),
        }
    }

    #[test]
    fn test_transport_fault_display_lists_everything() {
        let display = fault(500, "7", "8").to_string();

        assert!(display.contains("status=500"));
        assert!(display.contains("error=none"));
        assert!(display.contains("request_id=7"));
        assert!(display.contains("response_id=8"));
    }

    #[test]
    fn test_transport_fault_checks() {
        let f = fault(200, "1", "1");
        assert!(f.status_ok());
        assert!(f.id_matches());
        assert!(f.envelope_decoded());

        let f = fault(401, "1", "2");
        assert!(!f.status_ok());
        assert!(!f.id_matches());
    }

    #[test]
    fn test_transport_fault_source_is_decode_error() {
        let decode_error = serde_json::from_str::<RpcResponse>("not json").unwrap_err();
        let mut f = fault(200, "1", "");
        f.decode_error = Some(Arc::new(decode_error));

        assert!(!f.envelope_decoded());
        assert!(f.source().is_some());

        let error: Error = f.into();
        assert_eq!(error.kind(), "transport");
        assert!(error.as_transport().is_some());
    }

    #[test]
    fn test_decode_error_is_transparent() {
        let serde_error = serde_json::from_value::<u8>(json!("x")).unwrap_err();
        let expected = serde_error.to_string();
        let error: Error = serde_error.into();

        assert_eq!(error.to_string(), expected);
        assert_eq!(error.kind(), "decode");
    }

    #[test]
    fn test_mismatch_display() {
        let error = Error::ResultTypeMismatch {
            expected: ScalarKind::Number,
            actual: json!(true),
        };
        assert_eq!(error.to_string(), "Response result is not a number: true");
    }

    #[test]
    fn test_coercion_keeps_envelope() {
        let error_object = json!({"code": -6, "message": "Insufficient funds"});
        let response = RpcResponse::new(None, Some(error_object), "3");
        let error = Error::NoResultPresent.with_response(response.clone());

        assert_eq!(error.kind(), "no_result");
        assert_eq!(error.to_string(), "Response result is absent or null");
        assert!(matches!(error.root(), Error::NoResultPresent));
        assert_eq!(error.response(), Some(&response));
        assert!(error.source().is_some());
        assert!(error.as_transport().is_none());
    }

    #[test]
    fn test_plain_errors_carry_no_envelope() {
        assert!(Error::NoResultPresent.response().is_none());
        assert!(matches!(Error::NoFaultPresent.root(), Error::NoFaultPresent));

        let transport: Error = fault(500, "1", "1").into();
        assert_eq!(transport.response(), Some(&RpcResponse::default()));
    }

    #[test]
    fn test_rpc_fault_display() {
        let fault = RpcFault::new(-32601, "Method not found");
        assert_eq!(format!("{}", fault), "[-32601] Method not found");
    }

    #[test]
    fn test_rpc_fault_ignores_extra_fields() {
        let fault: RpcFault =
            serde_json::from_value(json!({"code": -1, "message": "x", "data": [1, 2]})).unwrap();
        assert_eq!(fault, RpcFault::new(-1, "x"));
    }
}
