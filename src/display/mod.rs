//! Status bar display module
//!
//! A host status bar is anything that can render a [`StatusItem`]. The crate
//! ships a line-oriented terminal sink for tmux/waybar style bars and a
//! recording sink for tests.

mod recording;
mod terminal;

pub use recording::RecordingDisplay;
pub use terminal::{ansi_color, TerminalStatusBar};

use crate::config::{Alignment, DisplayConfig};
use crate::price::{status_text, FetchError, Price, PLACEHOLDER_TEXT};
use chrono::{DateTime, TimeZone};
use serde::Serialize;

/// Outcome of the poll the item was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Ok,
    Error,
}

/// One rendering of the status bar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusItem {
    /// Short text shown in the bar
    pub text: String,
    /// Hover text
    pub tooltip: String,
    pub alignment: Alignment,
    /// Higher priority sits closer to the aligned edge
    pub priority: i32,
    /// Theme colour token
    pub color: Option<String>,
    pub state: StatusState,
}

impl StatusItem {
    /// Item for a successful poll
    pub fn price<Tz>(price: Price, updated_at: DateTime<Tz>, config: &DisplayConfig) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            text: status_text(price),
            tooltip: format!("Updated at {}", updated_at.format("%H:%M:%S")),
            alignment: config.alignment,
            priority: config.priority,
            color: config.color.clone(),
            state: StatusState::Ok,
        }
    }

    /// Placeholder item for a failed poll
    pub fn error(err: &FetchError, config: &DisplayConfig) -> Self {
        Self {
            text: PLACEHOLDER_TEXT.to_string(),
            tooltip: format!("Failed to fetch BTC price: {}", err),
            alignment: config.alignment,
            priority: config.priority,
            color: config.color.clone(),
            state: StatusState::Error,
        }
    }
}

/// A host status bar widget
pub trait StatusDisplay: Send + Sync {
    /// Replace the displayed text and tooltip
    fn render(&self, item: &StatusItem);
}
