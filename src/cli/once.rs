//! Once command implementation

use super::build_poller;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct OnceArgs {}

impl OnceArgs {
    /// Refresh once; a failed fetch still prints the placeholder, then errors
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let poller = build_poller(config)?;
        let price = poller.refresh_once().await?;
        tracing::debug!(price = %price.amount(), "Single refresh complete");
        Ok(())
    }
}
