//! CLI interface for btc-ticker
//!
//! Provides subcommands for:
//! - `run`: Poll continuously and print status lines
//! - `once`: Single refresh, then exit
//! - `config`: Show the effective configuration

mod once;
mod run;

pub use once::OnceArgs;
pub use run::RunArgs;

use crate::config::Config;
use crate::display::TerminalStatusBar;
use crate::poller::PricePoller;
use crate::price::SpotPriceClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "btc-ticker")]
#[command(about = "Status bar ticker for the BTC spot price")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll on a timer and print one status line per refresh
    Run(RunArgs),
    /// Refresh once and exit
    Once(OnceArgs),
    /// Show the effective configuration
    Config,
}

/// Wire the HTTP client and stdout sink into a poller
fn build_poller(config: &Config) -> anyhow::Result<PricePoller> {
    let source = SpotPriceClient::with_config(config.ticker.spot_config())?;
    let display = TerminalStatusBar::stdout(config.display.format, config.display.width);

    Ok(PricePoller::new(
        Arc::new(source),
        Arc::new(display),
        config.display.clone(),
    ))
}

/// Render the configuration as TOML, annotated with the effective interval
pub fn describe_config(config: &Config) -> anyhow::Result<String> {
    let body = toml::to_string_pretty(config)?;
    Ok(format!(
        "# effective refresh interval: {}s\n{}",
        config.ticker.effective_interval().as_secs(),
        body
    ))
}
