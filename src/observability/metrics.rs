//! Metrics collection and exposition.
//!
//! # Metrics
//! - `product_store_http_requests_total` (counter): requests by method, route, status
//! - `product_store_http_request_duration_seconds` (histogram): latency by method, route
//! - `product_store_mutations_total` (counter): successful create/update/delete
//! - `product_store_products` (gauge): current collection size

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP scrape listener on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed HTTP request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "product_store_http_requests_total",
        "method" => method.to_string(),
        "path" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "product_store_http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a successful collection mutation.
pub fn record_mutation(operation: &'static str) {
    metrics::counter!("product_store_mutations_total", "operation" => operation).increment(1);
}

/// Record the current collection size.
pub fn record_product_count(count: usize) {
    metrics::gauge!("product_store_products").set(count as f64);
}

/// Middleware recording per-route request metrics.
///
/// Uses the matched route template (`/products/{id}`) rather than the raw
/// path to keep label cardinality bounded.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
