//! Price poller
//!
//! Couples a [`PriceSource`] to a [`StatusDisplay`]. Overlapping refresh
//! triggers (timer ticks, manual clicks) collapse onto the single fetch that
//! is already in flight.

mod scheduler;

pub use scheduler::Scheduler;

use crate::config::DisplayConfig;
use crate::display::{StatusDisplay, StatusItem};
use crate::price::{FetchError, Price, PriceSource};
use crate::telemetry::{record_fetch, set_last_price};
use chrono::Local;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::RwLock;

/// A refresh that any number of callers can await
pub type SharedFetch = Shared<BoxFuture<'static, Result<Price, FetchError>>>;

/// Polls a price source and renders the result
#[derive(Clone)]
pub struct PricePoller {
    inner: Arc<PollerInner>,
}

struct PollerInner {
    source: Arc<dyn PriceSource>,
    display: Arc<dyn StatusDisplay>,
    display_config: RwLock<DisplayConfig>,
    in_flight: Mutex<Option<SharedFetch>>,
}

impl PricePoller {
    pub fn new(
        source: Arc<dyn PriceSource>,
        display: Arc<dyn StatusDisplay>,
        display_config: DisplayConfig,
    ) -> Self {
        Self {
            inner: Arc::new(PollerInner {
                source,
                display,
                display_config: RwLock::new(display_config),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Start a refresh, or join the one already in flight
    ///
    /// The fetch is driven on a background task, so dropping the returned
    /// future does not cancel it. Must be called within a Tokio runtime.
    pub fn refresh_once(&self) -> SharedFetch {
        let mut slot = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(pending) = slot.as_ref() {
            tracing::debug!("Refresh already in flight, joining it");
            return pending.clone();
        }

        let inner = Arc::clone(&self.inner);
        let fetch = async move { inner.poll().await }.boxed().shared();
        *slot = Some(fetch.clone());
        drop(slot);

        tokio::spawn(fetch.clone());
        fetch
    }

    /// Whether a fetch is currently in flight
    pub fn is_refreshing(&self) -> bool {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Swap the display settings; applies from the next completed poll
    pub async fn set_display_config(&self, config: DisplayConfig) {
        *self.inner.display_config.write().await = config;
    }
}

impl PollerInner {
    async fn poll(&self) -> Result<Price, FetchError> {
        let started = Instant::now();
        let result = self.source.fetch_price().await;
        let elapsed = started.elapsed();

        let config = self.display_config.read().await.clone();
        let item = match &result {
            Ok(price) => {
                record_fetch("ok", elapsed);
                set_last_price(*price);
                tracing::info!(
                    price = %price.amount(),
                    latency_ms = elapsed.as_millis() as u64,
                    "BTC price updated"
                );
                StatusItem::price(*price, Local::now(), &config)
            }
            Err(e) => {
                record_fetch(e.kind(), elapsed);
                tracing::warn!(error = %e, kind = e.kind(), "BTC price fetch failed");
                StatusItem::error(e, &config)
            }
        };

        self.display.render(&item);

        *self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;

        result
    }
}
