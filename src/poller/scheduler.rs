//! Interval timer driving the poller

use super::PricePoller;
use crate::config::effective_interval;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns the single refresh timer
pub struct Scheduler {
    poller: PricePoller,
    timer: Option<JoinHandle<()>>,
    interval: Option<Duration>,
}

impl Scheduler {
    pub fn new(poller: PricePoller) -> Self {
        Self {
            poller,
            timer: None,
            interval: None,
        }
    }

    /// Refresh now and then every `max(10, interval_secs)` seconds
    ///
    /// Replaces any timer started earlier. Returns the interval in use.
    pub fn schedule(&mut self, interval_secs: u64) -> Duration {
        self.stop();

        let period = effective_interval(interval_secs);
        let poller = self.poller.clone();

        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // Failures are rendered by the poller
                let _ = poller.refresh_once().await;
            }
        }));
        self.interval = Some(period);

        tracing::info!(
            requested_secs = interval_secs,
            interval_secs = period.as_secs(),
            "Refresh timer scheduled"
        );

        period
    }

    /// Cancel the timer. An in-flight fetch still completes.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            tracing::debug!("Refresh timer stopped");
        }
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Interval of the running timer
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn poller(&self) -> &PricePoller {
        &self.poller
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
