//! Client metrics definitions
//!
//! OpenTelemetry instruments for monitoring calls to a daemon. They are
//! created when observability is enabled on the [`crate::ClientBuilder`] and
//! exported through the global meter provider.
//!
//! # Metrics Collected
//!
//! - **requests_total**: calls made, by method and outcome (counter)
//! - **request_duration**: round trip latency in seconds (histogram)
//! - **errors_total**: failed calls, by error kind (counter)
//! - **id_collisions_total**: calls whose correlation id was already in flight (counter)

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of calls made
    pub requests_total: Counter<u64>,
    /// Call duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
    /// Total number of correlation id collisions
    pub id_collisions_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter named after the service
    pub fn new(service_name: impl Into<String>) -> Self {
        let meter = global::meter_with_scope(
            opentelemetry::InstrumentationScope::builder(service_name.into()).build(),
        );
        Self::new_with_meter(&meter)
    }

    /// Create metrics on a specific meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("daemonrpc.client.requests.total")
                .with_description("Total number of RPC calls made")
                .build(),
            request_duration: meter
                .f64_histogram("daemonrpc.client.request.duration")
                .with_description("RPC call duration in seconds")
                .build(),
            errors_total: meter
                .u64_counter("daemonrpc.client.errors.total")
                .with_description("Total number of failed RPC calls")
                .build(),
            id_collisions_total: meter
                .u64_counter("daemonrpc.client.id_collisions.total")
                .with_description("Calls whose correlation id was already in flight")
                .build(),
        }
    }

    /// Record a finished call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failed call
    pub fn record_error(&self, kind: &str) {
        let attributes = &[KeyValue::new("error_kind", kind.to_string())];
        self.errors_total.add(1, attributes);
    }

    /// Record a correlation id collision
    pub fn record_id_collision(&self) {
        self.id_collisions_total.add(1, &[]);
    }
}
