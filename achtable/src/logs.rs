//! Pipeline log sink.
//!
//! Entries go to stderr with a level prefix and into a bounded history that
//! callers can drain, for example to report skipped rows after a rebuild.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Entries kept before the oldest is dropped.
const HISTORY_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth for grouped output.
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        format!("{}{} {}", "   ".repeat(self.indent as usize), prefix, self.message)
    }
}

/// Global log sink
pub static LOG_SINK: Lazy<LogSink> = Lazy::new(LogSink::new);

pub struct LogSink {
    quiet: AtomicBool,
    history: Mutex<VecDeque<LogEntry>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self {
            quiet: AtomicBool::new(false),
            history: Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
        }
    }

    /// Print an entry unless quiet, and record it.
    pub fn log(&self, entry: LogEntry) {
        if !self.is_quiet() {
            eprintln!("{}", entry.render());
        }
        // A poisoned lock only means another thread panicked mid-push.
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        if history.len() == HISTORY_CAPACITY {
            history.pop_front();
        }
        history.push_back(entry);
    }

    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    /// Take every recorded entry, oldest first.
    pub fn drain(&self) -> Vec<LogEntry> {
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        history.drain(..).collect()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_SINK.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_SINK.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_SINK.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_SINK.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOG_SINK.log(LogEntry::info(msg).with_indent(indent));
}
