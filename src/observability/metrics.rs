//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wallet_connect_total` (counter): connect attempts by outcome
//! - `wallet_balance_queries_total` (counter): balance lookups by asset kind, outcome
//! - `wallet_submissions_total` (counter): payments / NFT transfers by outcome
//! - `wallet_override_clients_total` (counter): per-call override clients built

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Start the Prometheus exporter on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_connect(outcome: &'static str) {
    counter!("wallet_connect_total", "outcome" => outcome).increment(1);
}

pub fn record_balance_query(asset: &'static str, outcome: &'static str) {
    counter!("wallet_balance_queries_total", "asset" => asset, "outcome" => outcome).increment(1);
}

pub fn record_submission(kind: &'static str, outcome: &'static str) {
    counter!("wallet_submissions_total", "kind" => kind, "outcome" => outcome).increment(1);
}

pub fn record_override_client() {
    counter!("wallet_override_clients_total").increment(1);
}
