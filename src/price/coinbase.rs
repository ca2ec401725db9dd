//! HTTP spot price client
//!
//! Issues a single GET against a Coinbase-style spot endpoint which answers
//! `{"data": {"base": "BTC", "currency": "USD", "amount": "65000.50"}}`.

use super::{FetchError, Price, PriceSource};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Coinbase BTC-USD spot price endpoint
pub const DEFAULT_SPOT_URL: &str = "https://api.coinbase.com/v2/prices/BTC-USD/spot";

pub const DEFAULT_USER_AGENT: &str = concat!("btc-ticker/", env!("CARGO_PKG_VERSION"));

/// Configuration for the spot price client
#[derive(Debug, Clone)]
pub struct SpotPriceConfig {
    /// Full URL of the spot endpoint
    pub url: String,
    /// Whole-request deadline
    pub timeout: Duration,
    /// Value sent in the User-Agent header
    pub user_agent: String,
}

impl Default for SpotPriceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SPOT_URL.to_string(),
            timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Client for the spot price endpoint
pub struct SpotPriceClient {
    config: SpotPriceConfig,
    client: Client,
}

impl SpotPriceClient {
    /// Create a client with default configuration
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(SpotPriceConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: SpotPriceConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { config, client })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn map_request_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.config.timeout)
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl PriceSource for SpotPriceClient {
    async fn fetch_price(&self) -> Result<Price, FetchError> {
        let started = Instant::now();
        tracing::debug!(url = %self.config.url, "Fetching spot price");

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let price = parse_spot_body(&body)?;

        tracing::debug!(
            price = %price.amount(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Spot price fetched"
        );

        Ok(price)
    }
}

/// Spot endpoint response body
#[derive(Debug, Deserialize)]
struct SpotResponse {
    data: SpotData,
}

#[derive(Debug, Deserialize)]
struct SpotData {
    /// Decimal amount as a string
    amount: String,
    #[allow(dead_code)]
    base: Option<String>,
    #[allow(dead_code)]
    currency: Option<String>,
}

/// Extract the price from a spot response body
fn parse_spot_body(body: &str) -> Result<Price, FetchError> {
    let response: SpotResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let amount = response.data.amount.trim();
    let value = Decimal::from_str(amount)
        .map_err(|_| FetchError::Parse(format!("amount is not a number: {:?}", amount)))?;

    Price::new(value)
}
