//! Message log shown inside the sheet.

use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// One submitted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    /// Submitted text.
    pub text: String,
    /// Local submission time.
    pub at: DateTime<Local>,
}

impl LogMessage {
    /// Display line: `HH:MM  text`.
    pub fn display(&self) -> String {
        format!("{}  {}", self.at.format("%H:%M"), self.text)
    }
}

/// Bounded log; the oldest message is dropped first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLog {
    messages: VecDeque<LogMessage>,
    capacity: usize,
}

impl MessageLog {
    /// Log holding at most `capacity` messages (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a message.
    pub fn push(&mut self, text: impl Into<String>, at: DateTime<Local>) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(LogMessage {
            text: text.into(),
            at,
        });
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The newest `rows` messages, oldest first.
    pub fn tail(&self, rows: usize) -> impl Iterator<Item = &LogMessage> {
        self.messages
            .iter()
            .skip(self.messages.len().saturating_sub(rows))
    }
}
