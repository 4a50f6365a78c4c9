//! Metrics collection and exposition.
//!
//! # Metrics
//! - `jsonapi_requests_total` (counter): requests by method, status
//! - `jsonapi_negotiation_rejections_total` (counter): guard rejections by reason
//! - `jsonapi_encoders_built_total` (counter): encoder constructions by name

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16) {
    counter!(
        "jsonapi_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_rejection(reason: &'static str) {
    counter!("jsonapi_negotiation_rejections_total", "reason" => reason).increment(1);
}

pub fn record_encoder_built(encoder: &str) {
    counter!("jsonapi_encoders_built_total", "encoder" => encoder.to_string()).increment(1);
}
