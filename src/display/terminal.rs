//! Line-oriented terminal status sink
//!
//! Each render writes exactly one line, so the process can be used as a
//! tmux `status-right` command source or a waybar custom module.

use super::{StatusDisplay, StatusItem, StatusState};
use crate::config::{Alignment, OutputFormat};
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

/// Renders status items to a writer, one line each
pub struct TerminalStatusBar<W: Write + Send> {
    writer: Mutex<W>,
    format: OutputFormat,
    width: usize,
}

impl TerminalStatusBar<std::io::Stdout> {
    /// Render to stdout
    pub fn stdout(format: OutputFormat, width: usize) -> Self {
        Self::new(std::io::stdout(), format, width)
    }
}

impl<W: Write + Send> TerminalStatusBar<W> {
    pub fn new(writer: W, format: OutputFormat, width: usize) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            width,
        }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn format_line(&self, item: &StatusItem) -> String {
        match self.format {
            OutputFormat::Text => self.format_text(item),
            OutputFormat::Json => format_json(item),
        }
    }

    fn format_text(&self, item: &StatusItem) -> String {
        let width = self.width;
        let padded = match item.alignment {
            Alignment::Left => format!("{:<width$}", item.text),
            Alignment::Right => format!("{:>width$}", item.text),
        };

        match item.color.as_deref().and_then(ansi_color) {
            Some(code) => format!("\x1b[{}m{}\x1b[0m", code, padded),
            None => padded,
        }
    }
}

/// waybar custom module line
#[derive(Serialize)]
struct JsonLine<'a> {
    text: &'a str,
    tooltip: &'a str,
    class: StatusState,
    alignment: Alignment,
    priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
}

fn format_json(item: &StatusItem) -> String {
    let line = JsonLine {
        text: &item.text,
        tooltip: &item.tooltip,
        class: item.state,
        alignment: item.alignment,
        priority: item.priority,
        color: item.color.as_deref(),
    };
    // Only string and integer fields, serialization cannot fail
    serde_json::to_string(&line).unwrap_or_default()
}

/// Map a colour token to an SGR parameter string
///
/// Accepts basic colour names and `#rrggbb`. Host theme tokens such as
/// `statusBarItem.warningForeground` have no terminal equivalent and map to `None`.
pub fn ansi_color(token: &str) -> Option<String> {
    let token = token.trim();
    if let Some(hex) = token.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
        return Some(format!("38;2;{};{};{}", r, g, b));
    }

    let code = match token.to_ascii_lowercase().as_str() {
        "black" => 30,
        "red" => 31,
        "green" => 32,
        "yellow" => 33,
        "blue" => 34,
        "magenta" => 35,
        "cyan" => 36,
        "white" => 37,
        _ => return None,
    };
    Some(code.to_string())
}

impl<W: Write + Send> StatusDisplay for TerminalStatusBar<W> {
    fn render(&self, item: &StatusItem) {
        let line = self.format_line(item);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            tracing::warn!(error = %e, "Failed to write status line");
        }
    }
}
