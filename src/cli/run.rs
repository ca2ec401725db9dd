//! Run command implementation

use super::build_poller;
use crate::config::Config;
use crate::poller::Scheduler;
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the configured refresh interval (seconds, minimum 10)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Ignore stdin instead of treating each line as a refresh request
    #[arg(long)]
    pub no_stdin: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: Config, config_path: PathBuf) -> anyhow::Result<()> {
        let poller = build_poller(&config)?;
        let mut scheduler = Scheduler::new(poller);
        scheduler.schedule(self.interval_secs(&config));

        let mut stdin = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = !self.no_stdin;
        let mut reload = ReloadSignal::new()?;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutting down");
                    break;
                }
                line = stdin.next_line(), if stdin_open => match line {
                    Ok(Some(_)) => {
                        tracing::debug!("Manual refresh requested");
                        // Driven in the background, joins any fetch in flight
                        drop(scheduler.poller().refresh_once());
                    }
                    Ok(None) => {
                        tracing::debug!("stdin closed, manual refresh disabled");
                        stdin_open = false;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read stdin, manual refresh disabled");
                        stdin_open = false;
                    }
                },
                _ = reload.recv() => {
                    self.reload(&mut scheduler, &config_path).await;
                }
            }
        }

        scheduler.stop();
        Ok(())
    }

    fn interval_secs(&self, config: &Config) -> u64 {
        self.interval
            .unwrap_or(config.ticker.refresh_interval_secs)
    }

    /// Re-read the config file and restart the timer with its interval
    async fn reload(&self, scheduler: &mut Scheduler, config_path: &Path) {
        match Config::load(config_path) {
            Ok(config) => {
                scheduler
                    .poller()
                    .set_display_config(config.display.clone())
                    .await;
                scheduler.schedule(self.interval_secs(&config));
                tracing::info!(path = %config_path.display(), "Configuration reloaded");
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "Failed to reload configuration, keeping current settings"
                );
            }
        }
    }
}

/// SIGHUP listener; never fires on platforms without it
struct ReloadSignal {
    #[cfg(unix)]
    inner: tokio::signal::unix::Signal,
}

impl ReloadSignal {
    #[cfg(unix)]
    fn new() -> anyhow::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self {
            inner: signal(SignalKind::hangup())?,
        })
    }

    #[cfg(not(unix))]
    fn new() -> anyhow::Result<Self> {
        Ok(Self {})
    }

    #[cfg(unix)]
    async fn recv(&mut self) {
        if self.inner.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }

    #[cfg(not(unix))]
    async fn recv(&mut self) {
        std::future::pending::<()>().await;
    }
}
