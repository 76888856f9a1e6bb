//! Core envelope types and result coercion for daemonrpc
//!
//! This crate holds everything about the JSON-RPC 1.0 dialect spoken by
//! Bitcoin-family wallet and node daemons that does not need a network:
//!
//! - **Types**: request/response envelopes with untyped `result`/`error`
//! - **Codec**: envelope encoding, strict and salvaging response decoding
//! - **Coercion**: turning an untyped `result` into a record, list or scalar
//! - **Faults**: extracting the daemon's `{code, message}` error object
//! - **Ids**: correlation id strategies
//! - **Records**: decode targets for common wallet/node results
//! - **Observability**: tracing/OpenTelemetry bootstrap
//!
//! The HTTP round trip lives in `daemonrpc-client`.
//!
//! # Example
//!
//! ```rust
//! use daemonrpc_core::{codec, RpcResponse, SignedTransaction};
//!
//! let body = br#"{"result":{"hex":"0200","complete":true},"error":null,"id":"4"}"#;
//! let response: RpcResponse = codec::decode_response(body).unwrap();
//!
//! let signed: SignedTransaction = response.decode_result().unwrap();
//! assert!(signed.complete);
//! assert!(response.fault().is_err());
//! ```

pub mod codec;
pub mod coerce;
pub mod error;
mod fault;
pub mod id;
pub mod observability;
pub mod records;
pub mod types;

pub use coerce::{Reply, ScalarKind};
pub use error::{Error, Result, RpcFault, TransportFault};
pub use id::{IdGenerator, IdStrategy};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use records::{
    Balance, RawTransaction, ScriptPubKey, ScriptSig, SignedTransaction, Unspent, UnspentList,
    ValidatedAddress, Vin, Vout, Wallet,
};
pub use types::{RpcRequest, RpcResponse, JSONRPC_VERSION};
