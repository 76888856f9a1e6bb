//! daemonrpc - JSON-RPC 1.0 over HTTP for wallet and node daemons
//!
//! This is the main convenience crate that re-exports the daemonrpc
//! sub-crates. Use it if you want a single dependency for the client and
//! the result types.
//!
//! # Architecture
//!
//! - **daemonrpc-core**: envelopes, codec, coercion, faults, records,
//!   error handling, observability
//! - **daemonrpc-client**: HTTP client, builder, wire tap, metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use daemonrpc::{RpcClient, Wallet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::new("http://127.0.0.1:8332", "rpcuser", "rpcpassword")?;
//!
//!     let wallet: Wallet = client.request_and_decode("getwalletinfo", ()).await?.into_value();
//!     println!("{} transactions", wallet.txcount);
//!
//!     let fee = client.request_number("estimatefee", [6]).await?;
//!     println!("fee rate: {}", fee.value);
//!
//!     Ok(())
//! }
//! ```

pub use daemonrpc_client as client;
pub use daemonrpc_core as core;

// Convenience re-exports of the most commonly used types
pub use daemonrpc_client::{ClientBuilder, RpcClient, TracingTap, WireTap};
pub use daemonrpc_core::{
    Error, IdStrategy, ObservabilityConfig, RawTransaction, Reply, Result, RpcFault, RpcResponse,
    SignedTransaction, TransportFault, Unspent, UnspentList, ValidatedAddress, Wallet,
};
