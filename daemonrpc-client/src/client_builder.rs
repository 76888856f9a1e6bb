//! Client builder for endpoint, credentials and diagnostics
//!
//! The `ClientBuilder` provides a fluent API for configuring an
//! [`RpcClient`](crate::RpcClient) before use. It allows you to:
//! - Set Basic auth credentials
//! - Turn on verbose wire tracing, or install a custom [`WireTap`]
//! - Pick the correlation id strategy
//! - Configure observability (OpenTelemetry)
//!
//! # Examples
//!
//! ```rust,no_run
//! use daemonrpc_client::ClientBuilder;
//! use daemonrpc_core::IdStrategy;
//!
//! # fn example() -> daemonrpc_core::Result<()> {
//! let client = ClientBuilder::new("http://127.0.0.1:8332")
//!     .credentials("rpcuser", "rpcpassword")
//!     .verbose(true)
//!     .build()?;
//!
//! // Legacy peers that expect timestamp ids
//! let legacy = ClientBuilder::new("http://127.0.0.1:8332")
//!     .credentials("rpcuser", "rpcpassword")
//!     .id_strategy(IdStrategy::UnixSeconds)
//!     .build()?;
//!
//! // From DAEMONRPC_URL, DAEMONRPC_USER, DAEMONRPC_PASSWORD, DAEMONRPC_VERBOSE
//! let from_env = ClientBuilder::from_env()?.build()?;
//! # Ok(())
//! # }
//! ```

use crate::client::Credentials;
use crate::in_flight::InFlightRegistry;
use crate::{ClientMetrics, RpcClient, TracingTap, WireTap};
use daemonrpc_core::{Error, IdGenerator, IdStrategy, ObservabilityConfig, Result};
use std::sync::Arc;
use url::Url;

/// Environment variable holding the endpoint URL
pub const ENV_URL: &str = "DAEMONRPC_URL";
/// Environment variable holding the Basic auth user
pub const ENV_USER: &str = "DAEMONRPC_USER";
/// Environment variable holding the Basic auth password
pub const ENV_PASSWORD: &str = "DAEMONRPC_PASSWORD";
/// Environment variable switching verbose wire tracing on
pub const ENV_VERBOSE: &str = "DAEMONRPC_VERBOSE";

/// Builder for configuring and creating an RpcClient
pub struct ClientBuilder {
    url: String,
    credentials: Option<Credentials>,
    verbose: bool,
    wire_tap: Option<Arc<dyn WireTap>>,
    id_strategy: IdStrategy,
    observability_config: Option<ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: None,
            verbose: false,
            wire_tap: None,
            id_strategy: IdStrategy::default(),
            observability_config: None,
            service_name: None,
        }
    }

    /// Configure a builder from `DAEMONRPC_*` environment variables
    ///
    /// `DAEMONRPC_URL` is required. Credentials are only set when
    /// `DAEMONRPC_USER` is present; the password defaults to empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(ENV_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{} is not set", ENV_URL)))?;

        let mut builder = Self::new(url);

        if let Some(user) = lookup(ENV_USER) {
            let password = lookup(ENV_PASSWORD).unwrap_or_default();
            builder = builder.credentials(user, password);
        }

        if let Some(flag) = lookup(ENV_VERBOSE) {
            builder = builder.verbose(parse_flag(ENV_VERBOSE, &flag)?);
        }

        Ok(builder)
    }

    /// Authenticate every call with HTTP Basic auth
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(user, password));
        self
    }

    /// Hand raw request and response bodies to the wire tap
    ///
    /// Without a custom tap, bodies are emitted as `tracing` events by
    /// [`TracingTap`].
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Install a custom wire tap (implies verbose)
    pub fn with_wire_tap(mut self, tap: Arc<dyn WireTap>) -> Self {
        self.wire_tap = Some(tap);
        self.verbose = true;
        self
    }

    /// Choose how correlation ids are generated
    pub fn id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(ObservabilityConfig::default());
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Validate the configuration and create the client
    ///
    /// No network traffic happens here.
    pub fn build(self) -> Result<RpcClient> {
        let url = Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("Invalid URL {:?}: {}", self.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Unsupported URL scheme {:?}, expected http or https",
                url.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        // Initialize observability if configured
        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            daemonrpc_core::init_observability(config.clone()).map_err(|e| {
                Error::Config(format!("Failed to initialize observability: {}", e))
            })?;

            Some(Arc::new(ClientMetrics::new(config.service_name)))
        } else {
            None
        };

        let wire_tap = match (self.verbose, self.wire_tap) {
            (false, _) => None,
            (true, Some(tap)) => Some(tap),
            (true, None) => Some(Arc::new(TracingTap) as Arc<dyn WireTap>),
        };

        tracing::debug!(
            url = %url,
            verbose = wire_tap.is_some(),
            id_strategy = ?self.id_strategy,
            "Client configured"
        );

        Ok(RpcClient {
            http,
            url,
            credentials: self.credentials,
            wire_tap,
            ids: Arc::new(IdGenerator::new(self.id_strategy)),
            in_flight: InFlightRegistry::new(),
            metrics,
        })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!(
            "{} must be a boolean flag, got {:?}",
            key, other
        ))),
    }
}
