//! Metrics collection and exposition.
//!
//! # Metrics
//! - `website_requests_total` (counter): requests by method, status, handler
//! - `website_request_duration_seconds` (histogram): latency by handler
//!
//! Without an installed recorder the macros are no-ops, so recording is
//! always safe to call.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "website_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "website_request_duration_seconds";

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus exporter"),
    }
}

pub fn record_request(method: &str, status: u16, handler: &str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();

    counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string(),
        "handler" => handler.to_string()
    )
    .increment(1);

    histogram!(REQUEST_DURATION_SECONDS, "handler" => handler.to_string()).record(elapsed);
}
