//! JSON-RPC client over HTTP
//!
//! This module provides `RpcClient`, which turns a method name and positional
//! parameters into one authenticated HTTP POST and validates what comes back.
//!
//! # Call Lifecycle
//!
//! 1. **Encode**: positional params and a fresh correlation id into a
//!    `{"jsonrpc":"1.0",...}` envelope
//! 2. **Send**: POST with Basic auth, wait for the full body
//! 3. **Validate**: the envelope must decode, the status must be 200 and the
//!    echoed id must match; any failure yields one aggregated
//!    [`TransportFault`]
//! 4. **Coerce** (optional): typed record, list or scalar out of `result`
//!
//! # Cloning
//!
//! `RpcClient` is cheaply cloneable. Clones share the HTTP connection pool,
//! the id generator and the in-flight registry, so ids stay unique across
//! every clone of a handle.

use crate::{in_flight::InFlightRegistry, ClientBuilder, ClientMetrics, WireTap};
use daemonrpc_core::{
    codec, Error, IdGenerator, Reply, Result, RpcRequest, RpcResponse, TransportFault,
};
use reqwest::header::CONTENT_TYPE;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Basic auth credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Basic auth user name
    pub user: String,
    /// Basic auth password, redacted from `Debug` output
    pub password: String,
}

impl Credentials {
    /// Pair a user name with a password
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// JSON-RPC client for one daemon endpoint
#[derive(Clone)]
pub struct RpcClient {
    /// Pooled HTTP client
    pub(crate) http: reqwest::Client,
    /// Endpoint every call is POSTed to
    pub(crate) url: Url,
    /// Basic auth credentials, if any
    pub(crate) credentials: Option<Credentials>,
    /// Receiver of raw bodies when verbose
    pub(crate) wire_tap: Option<Arc<dyn WireTap>>,
    /// Correlation id source
    pub(crate) ids: Arc<IdGenerator>,
    /// Ids currently on the wire
    pub(crate) in_flight: InFlightRegistry,
    /// Metrics for observability
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl RpcClient {
    /// Create a client with Basic auth and default settings
    ///
    /// Equivalent to `ClientBuilder::new(url).credentials(user, password).build()`.
    pub fn new(
        url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        ClientBuilder::new(url).credentials(user, password).build()
    }

    /// Start configuring a client
    pub fn builder(url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(url)
    }

    /// The endpoint this client talks to
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether raw bodies are handed to a wire tap
    pub fn is_verbose(&self) -> bool {
        self.wire_tap.is_some()
    }

    /// Number of calls that found their correlation id already in flight
    pub fn id_collisions(&self) -> u64 {
        self.in_flight.collisions()
    }

    /// Send one call and return the validated response envelope
    ///
    /// `params` must serialize to a JSON array (a tuple, a `Vec`, or
    /// `json!([...])`); `()` sends no parameters.
    ///
    /// A populated `error` field is not a failure at this level; use
    /// [`RpcResponse::fault`] to read it.
    ///
    /// # Errors
    ///
    /// - `Serialization` if `params` is not a positional list
    /// - `Connection` if no response was received
    /// - `Transport` if the body is not an envelope, the status is not 200,
    ///   or the echoed id differs from the one sent
    #[tracing::instrument(skip(self, params), fields(method = %method, id = tracing::field::Empty))]
    pub async fn request<P>(&self, method: &str, params: P) -> Result<RpcResponse>
    where
        P: Serialize,
    {
        let start = Instant::now();
        let outcome = self.send(method, params).await;
        let duration = start.elapsed().as_secs_f64();

        if let Some(ref m) = self.metrics {
            match &outcome {
                Ok(_) => m.record_request(method, "success", duration),
                Err(e) => {
                    m.record_request(method, "error", duration);
                    m.record_error(e.kind());
                }
            }
        }

        outcome
    }

    /// Send one call and decode an object or array result into `T`
    ///
    /// When coercion fails the error is [`Error::Coercion`], which still
    /// carries the envelope; use [`Error::root`] for the underlying failure
    /// and [`Error::response`] to reach a daemon error sent with it.
    pub async fn request_and_decode<T, P>(&self, method: &str, params: P) -> Result<Reply<T>>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let response = self.request(method, params).await?;
        self.coerce(method, response, |r| r.decode_result())
    }

    /// Send one call whose result must be a JSON number
    pub async fn request_number<P: Serialize>(
        &self,
        method: &str,
        params: P,
    ) -> Result<Reply<f64>> {
        let response = self.request(method, params).await?;
        self.coerce(method, response, RpcResponse::number)
    }

    /// Send one call whose result must be a JSON string
    pub async fn request_string<P: Serialize>(
        &self,
        method: &str,
        params: P,
    ) -> Result<Reply<String>> {
        let response = self.request(method, params).await?;
        self.coerce(method, response, RpcResponse::string)
    }

    /// Send one call whose result must be a JSON boolean
    pub async fn request_bool<P: Serialize>(
        &self,
        method: &str,
        params: P,
    ) -> Result<Reply<bool>> {
        let response = self.request(method, params).await?;
        self.coerce(method, response, RpcResponse::boolean)
    }

    fn coerce<T, F>(&self, method: &str, response: RpcResponse, coerce: F) -> Result<Reply<T>>
    where
        F: FnOnce(&RpcResponse) -> Result<T>,
    {
        let reply = response.into_reply(coerce);
        if let Err(ref err) = reply {
            tracing::debug!(
                method = %method,
                kind = err.kind(),
                has_fault = err.response().is_some_and(RpcResponse::has_fault),
                "Result coercion failed"
            );
            if let Some(ref m) = self.metrics {
                m.record_error(err.kind());
            }
        }
        reply
    }

    async fn send<P: Serialize>(&self, method: &str, params: P) -> Result<RpcResponse> {
        let params = codec::positional_params(params)?;
        let id = self.ids.next_id();
        tracing::Span::current().record("id", id.as_str());

        let request = RpcRequest::new(method, params, id.clone());
        let body = codec::encode_request(&request)?;

        if let Some(ref tap) = self.wire_tap {
            tap.on_request(&id, method, &body);
        }

        // held until the response has been read
        let guard = self.in_flight.register(&id);
        if guard.collided() {
            tracing::warn!(id = %id, method = %method, "Correlation id already in flight");
            if let Some(ref m) = self.metrics {
                m.record_id_collision();
            }
        }

        tracing::debug!(bytes = body.len(), "Sending request");
        let (status, raw) = self.round_trip(body).await?;
        drop(guard);

        let text = String::from_utf8_lossy(&raw).into_owned();
        if let Some(ref tap) = self.wire_tap {
            tap.on_response(&id, status, &text);
        }

        let (response, decode_error) = match codec::decode_response(&raw) {
            Ok(response) => (response, None),
            Err(err) => (codec::salvage_response(&raw), Some(Arc::new(err))),
        };

        if decode_error.is_some() || status != 200 || response.id != id {
            let fault = TransportFault {
                status,
                decode_error,
                body: text,
                request_id: id,
                response_id: response.id.clone(),
                response,
            };
            tracing::warn!(
                status = fault.status,
                decoded = fault.envelope_decoded(),
                request_id = %fault.request_id,
                response_id = %fault.response_id,
                "Response rejected"
            );
            return Err(fault.into());
        }

        tracing::debug!(status, "Response accepted");
        Ok(response)
    }

    async fn round_trip(&self, body: String) -> Result<(u16, Vec<u8>)> {
        let mut request = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(ref credentials) = self.credentials {
            request = request.basic_auth(&credentials.user, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let raw = response
            .bytes()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok((status, raw.to_vec()))
    }
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.url.as_str())
            .field("credentials", &self.credentials)
            .field("verbose", &self.is_verbose())
            .field("id_strategy", &self.ids.strategy())
            .field("observability", &self.metrics.is_some())
            .finish()
    }
}
