//! Spot price module
//!
//! Fetches the BTC spot price over HTTP and renders it as a currency string

mod coinbase;
mod format;

pub use coinbase::{SpotPriceClient, SpotPriceConfig, DEFAULT_SPOT_URL, DEFAULT_USER_AGENT};
pub use format::{format_usd, status_text, PLACEHOLDER_TEXT};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A spot price in USD. Always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    /// Wrap a decimal, rejecting negative amounts
    pub fn new(amount: Decimal) -> Result<Self, FetchError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FetchError::Parse(format!("negative amount: {}", amount)));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_usd(*self))
    }
}

/// Spot price fetch errors
///
/// `Clone` so that every waiter on a shared in-flight fetch gets the same outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Non-2xx status, or the request never got a response
    #[error("HTTP error: {0}")]
    Http(String),
    /// No response within the deadline
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// Malformed body or missing/invalid amount
    #[error("invalid response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Http(_) => "http",
            FetchError::Timeout(_) => "timeout",
            FetchError::Parse(_) => "parse",
        }
    }
}

/// Trait for spot price sources
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Issue a single fetch. Implementations must not retry.
    async fn fetch_price(&self) -> Result<Price, FetchError>;
}
