//! btc-ticker: status bar ticker for the BTC spot price
//!
//! This library provides:
//! - A spot price client with a fixed request deadline
//! - en-US currency formatting of the price
//! - A poller that collapses overlapping refreshes into one fetch
//! - An interval scheduler with a 10 second floor
//! - Status bar sinks (terminal text/JSON lines)
//! - Logging and metrics setup

pub mod cli;
pub mod config;
pub mod display;
pub mod poller;
pub mod price;
pub mod telemetry;
