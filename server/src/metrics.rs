//! Request metrics for the Setlist server.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `setlist_requests_total{operation}` - Requests by operation (list, search, delete, update)
//! - `setlist_search_results_total` - Events returned by searches
//! - `setlist_updates_total{outcome}` - Updates by outcome (applied, missing)
//! - `setlist_store_errors_total{operation}` - Store failures (recorded by the Postgres store)

use crate::config::MetricsConfig;
use metrics::describe_counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::{IpAddr, SocketAddr};

/// Register all metric descriptions.
///
/// This should be called once at application startup, before any metrics are recorded.
pub fn register_metrics() {
    describe_counter!(
        "setlist_requests_total",
        "Total number of API requests by operation"
    );
    describe_counter!(
        "setlist_search_results_total",
        "Total number of events returned by searches"
    );
    describe_counter!(
        "setlist_updates_total",
        "Total number of rating updates by outcome (applied, missing)"
    );
    describe_counter!(
        "setlist_store_errors_total",
        "Total number of failed event store operations"
    );

    tracing::info!("Metrics registered");
}

/// Start the Prometheus exporter on the configured address.
///
/// # Errors
///
/// Returns an error if the host is not an IP address or the exporter cannot start.
pub fn install_exporter(config: &MetricsConfig) -> Result<SocketAddr, BuildError> {
    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|e| BuildError::FailedToCreateHTTPListener(format!("{e}")))?;
    let addr = SocketAddr::new(ip, config.port);

    PrometheusBuilder::new().with_http_listener(addr).install()?;
    Ok(addr)
}

/// Record one API request.
pub fn record_request(operation: &'static str) {
    metrics::counter!("setlist_requests_total", "operation" => operation).increment(1);
}

/// Record the number of events a search returned.
pub fn record_search_results(count: usize) {
    let count = u64::try_from(count).unwrap_or(u64::MAX);
    metrics::counter!("setlist_search_results_total").increment(count);
}

/// Record the outcome of an update.
pub fn record_update(outcome: &'static str) {
    metrics::counter!("setlist_updates_total", "outcome" => outcome).increment(1);
    tracing::debug!(outcome, "Recorded update metric");
}
