//! Metrics collection and exposition.
//!
//! # Metrics
//! - `accesstime_authorizations_total` (counter): decisions by outcome
//! - `accesstime_lookup_duration_seconds` (histogram): chain read latency
//! - `accesstime_chain_rpc_healthy` (gauge): 1=reachable, 0=unreachable
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with an HTTP scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one authorization decision.
pub fn record_authorization(outcome: &'static str) {
    metrics::counter!("accesstime_authorizations_total", "outcome" => outcome).increment(1);
}

/// Record the latency of one access time lookup.
pub fn record_lookup_duration(started: Instant) {
    metrics::histogram!("accesstime_lookup_duration_seconds").record(started.elapsed().as_secs_f64());
}

pub fn record_chain_health(healthy: bool) {
    metrics::gauge!("accesstime_chain_rpc_healthy").set(if healthy { 1.0 } else { 0.0 });
}
