//! JSON-RPC 1.0 client for wallet and node daemons over HTTP
//!
//! This crate sends calls to Bitcoin-family daemons (`bitcoind`-style
//! wallet and node RPC endpoints) and validates their replies.
//!
//! # Core Features
//!
//! - **HTTP Transport**: one authenticated POST per call, pooled connections
//! - **Strict Acceptance**: decode failure, non-200 status and id mismatch are
//!   reported together as one `TransportFault`
//! - **Coercion**: typed records, lists and scalars out of the `result` field
//! - **Correlation Ids**: counter, random or legacy timestamp ids, with
//!   in-flight collision detection
//! - **Wire Tap**: verbose tracing of raw bodies through a pluggable callback
//! - **Observability**: OpenTelemetry integration for traces and metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use daemonrpc_client::RpcClient;
//! use daemonrpc_core::{UnspentList, ValidatedAddress};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::new("http://127.0.0.1:8332", "rpcuser", "rpcpassword")?;
//!
//!     let height = client.request_number("getblockcount", ()).await?;
//!     println!("height: {}", height.value);
//!
//!     let unspent = client
//!         .request_and_decode::<UnspentList, _>("listunspent", (1, 9999999))
//!         .await?;
//!     println!("{} spendable outputs", unspent.value.len());
//!
//!     let response = client.request("validateaddress", ["mzBc4XEFSdzCDcTxAgf6EZXgsZWpztRhef"]).await?;
//!     if let Ok(fault) = response.fault() {
//!         eprintln!("daemon error: {}", fault);
//!     } else {
//!         let address: ValidatedAddress = response.decode_result()?;
//!         println!("valid: {}", address.isvalid);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod in_flight;
mod metrics;
mod wire_tap;

pub use client::{Credentials, RpcClient};
pub use client_builder::{ClientBuilder, ENV_PASSWORD, ENV_URL, ENV_USER, ENV_VERBOSE};
pub use in_flight::{InFlightGuard, InFlightRegistry};
pub use metrics::ClientMetrics;
pub use wire_tap::{TracingTap, WireTap};
