//! Common test utilities for daemonrpc-client integration tests
//!
//! This module provides an in-process mock daemon so client behavior can be
//! tested without a real wallet or node.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use daemonrpc_client::WireTap;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

type Handler = dyn Fn(&str) -> (u16, String) + Send + Sync;

/// A request as the mock daemon saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    /// The request body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// The correlation id the client sent
    pub fn id(&self) -> String {
        self.json()["id"].as_str().unwrap().to_string()
    }
}

struct MockState {
    handler: Box<Handler>,
    delay: Duration,
    requests: Mutex<Vec<Recorded>>,
}

/// Mock JSON-RPC daemon for client testing
///
/// Every POST to `/` is recorded and answered by the handler, which sees the
/// raw request body and returns a status code and a raw response body.
pub struct MockDaemon {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDaemon {
    /// Start a daemon that answers with the handler's status and body
    pub async fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        Self::with_delayed_handler(Duration::ZERO, handler).await
    }

    /// Start a daemon that waits `delay` before answering each request
    pub async fn with_delayed_handler<F>(delay: Duration, handler: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        let state = Arc::new(MockState {
            handler: Box::new(handler),
            delay,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/", post(handle))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Start a daemon that answers every call with `result` and the echoed id
    pub async fn returning(result: Value) -> Self {
        Self::with_handler(move |body| (200, success_body(body, result.clone()))).await
    }

    /// Start a daemon that answers every call with a daemon error object
    pub async fn failing(status: u16, code: i64, message: &str) -> Self {
        let error = json!({"code": code, "message": message});
        Self::with_handler(move |body| {
            let reply = json!({"result": null, "error": error, "id": request_id(body)});
            (status, reply.to_string())
        })
        .await
    }

    /// Endpoint URL for a client
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The only request received so far
    pub fn single_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }

    /// Stop serving
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDaemon {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(Recorded {
        authorization: text(header::AUTHORIZATION),
        content_type: text(header::CONTENT_TYPE),
        body: body.clone(),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    let (status, reply) = (state.handler)(&body);
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        reply,
    )
}

/// Extract the correlation id from a raw request body
pub fn request_id(body: &str) -> String {
    let request: Value = serde_json::from_str(body).unwrap();
    request["id"].as_str().unwrap().to_string()
}

/// A success envelope echoing the request's id
pub fn success_body(request: &str, result: Value) -> String {
    json!({"result": result, "error": null, "id": request_id(request)}).to_string()
}

/// Address nothing is listening on
pub async fn unused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Wire tap that keeps everything it is handed
#[derive(Default)]
pub struct CapturingTap {
    pub requests: Mutex<Vec<(String, String, String)>>,
    pub responses: Mutex<Vec<(String, u16, String)>>,
}

impl WireTap for CapturingTap {
    fn on_request(&self, id: &str, method: &str, body: &str) {
        self.requests
            .lock()
            .unwrap()
            .push((id.to_string(), method.to_string(), body.to_string()));
    }

    fn on_response(&self, id: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push((id.to_string(), status, body.to_string()));
    }
}
