//! Prometheus metrics

use crate::price::Price;
use metrics_exporter_prometheus::PrometheusBuilder;
use rust_decimal::prelude::ToPrimitive;
use std::net::SocketAddr;
use std::time::Duration;

const FETCH_TOTAL: &str = "btc_ticker_fetch_total";
const FETCH_LATENCY: &str = "btc_ticker_fetch_latency_ms";
const LAST_PRICE: &str = "btc_ticker_last_price_usd";

/// Serve metrics on `0.0.0.0:port`
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}

/// Count a completed fetch and record its latency
pub fn record_fetch(outcome: &'static str, duration: Duration) {
    ::metrics::counter!(FETCH_TOTAL, "outcome" => outcome).increment(1);
    ::metrics::histogram!(FETCH_LATENCY).record(duration.as_secs_f64() * 1000.0);
}

/// Publish the latest spot price
pub fn set_last_price(price: Price) {
    if let Some(value) = price.amount().to_f64() {
        ::metrics::gauge!(LAST_PRICE).set(value);
    }
}
