//! In-memory display that keeps every rendered item

use super::{StatusDisplay, StatusItem};
use std::sync::Mutex;

/// Records renders in order
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    items: Mutex<Vec<StatusItem>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items rendered so far
    pub fn items(&self) -> Vec<StatusItem> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Most recent render, if any
    pub fn last(&self) -> Option<StatusItem> {
        self.items().pop()
    }
}

impl StatusDisplay for RecordingDisplay {
    fn render(&self, item: &StatusItem) {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(item.clone());
    }
}
