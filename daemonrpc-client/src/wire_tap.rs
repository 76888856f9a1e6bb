//! Raw request/response tracing for verbose clients
//!
//! A verbose client hands every serialized request body, and every response
//! status and body, to a [`WireTap`]. The default [`TracingTap`] turns them
//! into `info` events under the `daemonrpc::wire` target, so they can be
//! filtered with `RUST_LOG=daemonrpc::wire=info` or redirected by whatever
//! subscriber the application installs. Install a custom tap to capture or
//! forward bodies elsewhere.
//!
//! # Examples
//!
//! ```rust
//! use daemonrpc_client::{RpcClient, WireTap};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Default)]
//! struct Capture(Mutex<Vec<String>>);
//!
//! impl WireTap for Capture {
//!     fn on_request(&self, _id: &str, _method: &str, body: &str) {
//!         self.0.lock().unwrap().push(body.to_string());
//!     }
//!     fn on_response(&self, _id: &str, _status: u16, body: &str) {
//!         self.0.lock().unwrap().push(body.to_string());
//!     }
//! }
//!
//! let client = RpcClient::builder("http://127.0.0.1:18884")
//!     .with_wire_tap(Arc::new(Capture::default()))
//!     .build()
//!     .unwrap();
//! assert!(client.is_verbose());
//! ```

/// Receiver of raw wire bodies
///
/// Called synchronously on the calling task, so implementations should be
/// cheap and must not block.
pub trait WireTap: Send + Sync {
    /// A request body is about to be sent
    fn on_request(&self, id: &str, method: &str, body: &str);

    /// A response was fully read, before envelope validation
    fn on_response(&self, id: &str, status: u16, body: &str);
}

/// Default tap: emits bodies as `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTap;

impl WireTap for TracingTap {
    fn on_request(&self, id: &str, method: &str, body: &str) {
        tracing::info!(target: "daemonrpc::wire", id, method, body, "request");
    }

    fn on_response(&self, id: &str, status: u16, body: &str) {
        tracing::info!(target: "daemonrpc::wire", id, status, body, "response");
    }
}
