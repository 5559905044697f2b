//! Metrics collection and exposition.
//!
//! # Metrics
//! - `voting_rpc_calls_total` (counter): JSON-RPC reads by method, outcome
//! - `voting_rpc_healthy` (gauge): 1=reachable, 0=unreachable
//! - `voting_transactions_total` (counter): writes by kind, outcome
//! - `voting_session_errors_total` (counter): user-facing failures by action

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one RPC read.
pub fn record_rpc_call(method: &'static str, success: bool) {
    let outcome = if success { "ok" } else { "failed" };
    counter!("voting_rpc_calls_total", "method" => method, "outcome" => outcome).increment(1);
}

/// Record RPC reachability.
pub fn record_rpc_health(healthy: bool) {
    gauge!("voting_rpc_healthy").set(if healthy { 1.0 } else { 0.0 });
}

/// Record a transaction outcome (`confirmed`, `reverted`, `timeout`, `rejected`).
pub fn record_transaction(kind: &'static str, outcome: &'static str) {
    counter!("voting_transactions_total", "kind" => kind, "outcome" => outcome).increment(1);
}

/// Record a failure surfaced to the user.
pub fn record_session_error(action: &'static str) {
    counter!("voting_session_errors_total", "action" => action).increment(1);
}
