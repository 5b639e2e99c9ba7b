//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_dispatch_total` (counter): dispatch outcomes by `outcome`
//!   (`handled`, `not_found`, `resolution_error`)
//! - `gateway_invoice_filenames_total` (counter): filenames checked by `result`
//!   (`valid`, `invalid`)
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Prometheus exporter only started when enabled in config

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_dispatch(outcome: &'static str) {
    metrics::counter!("gateway_dispatch_total", "outcome" => outcome).increment(1);
}

pub fn record_invoice_filenames(valid: usize, invalid: usize) {
    metrics::counter!("gateway_invoice_filenames_total", "result" => "valid").increment(valid as u64);
    metrics::counter!("gateway_invoice_filenames_total", "result" => "invalid")
        .increment(invalid as u64);
}
