//! Game logger
//!
//! Messages go to stdout, to an in-memory capture buffer, or both. Separately
//! the logger keeps a capped history of game events (oldest evicted first);
//! that history is what state snapshots carry.

use crate::game::VerbosityLevel;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::ops::Deref;

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// e.g. "controller_choice"
    pub category: Option<String>,
}

/// Read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Centralized logger for game events
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    history_capacity: usize,

    /// Captured entries, every level, when the output mode captures
    log_buffer: RefCell<Vec<LogEntry>>,

    /// Minimal and Normal messages, capped at `history_capacity`
    history: RefCell<VecDeque<String>>,
}

impl GameLogger {
    pub const DEFAULT_HISTORY: usize = 50;

    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::default(),
            history_capacity: Self::DEFAULT_HISTORY,
            log_buffer: RefCell::new(Vec::new()),
            history: RefCell::new(VecDeque::with_capacity(Self::DEFAULT_HISTORY)),
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory and stop printing
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Resize the event history, evicting the oldest entries if needed
    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.history_capacity = capacity.max(1);
        let mut history = self.history.borrow_mut();
        while history.len() > self.history_capacity {
            history.pop_front();
        }
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Capped event history, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().iter().cloned().collect()
    }

    /// Get access to captured log entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Print captured entries that the verbosity allows, then clear them
    pub fn flush_buffer(&mut self) {
        let buffer = self.log_buffer.borrow();
        for entry in buffer.iter() {
            if entry.level <= self.verbosity {
                self.log_to_stdout(entry.level, &entry.message);
            }
        }
        drop(buffer);
        self.clear_logs();
    }

    #[inline]
    fn log_to_stdout(&self, level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{}", message);
        } else {
            println!("  {}", message);
        }
    }

    fn push_history(&self, message: &str) {
        let mut history = self.history.borrow_mut();
        if history.len() == self.history_capacity {
            history.pop_front();
        }
        history.push_back(message.to_string());
    }

    fn emit(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        if level <= VerbosityLevel::Normal {
            self.push_history(message);
        }

        let should_capture = self.is_capturing();
        let should_output = matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both);

        if should_capture {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        }

        if should_output && level <= self.verbosity {
            self.log_to_stdout(level, message);
        }
    }

    /// Round banners and the game result
    #[inline]
    pub fn minimal(&self, message: &str) {
        self.emit(VerbosityLevel::Minimal, message, None);
    }

    /// Game events
    #[inline]
    pub fn normal(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, message, None);
    }

    /// Ordering and decision details
    #[inline]
    pub fn verbose(&self, message: &str) {
        if VerbosityLevel::Verbose > self.verbosity && !self.is_capturing() {
            return;
        }
        self.emit(VerbosityLevel::Verbose, message, None);
    }

    /// Log a controller decision at Normal level
    ///
    /// The controller name is kept out of the message so logs match whichever
    /// controller made the choice.
    #[inline]
    pub fn controller_choice(&self, _controller_name: &str, message: &str) {
        self.emit(VerbosityLevel::Normal, message, Some("controller_choice"));
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .field("history_len", &self.history.borrow().len())
            .finish()
    }
}

impl Clone for GameLogger {
    /// Settings and history are cloned; the capture buffer starts empty
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            history_capacity: self.history_capacity,
            log_buffer: RefCell::new(Vec::new()),
            history: RefCell::new(self.history.borrow().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert_eq!(logger.history_capacity(), 50);
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");
        logger.verbose("verbose message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[2].level, VerbosityLevel::Verbose);
    }

    #[test]
    fn test_history_is_capped() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.set_history_capacity(3);
        for i in 0..5 {
            logger.normal(&format!("event {i}"));
        }
        logger.verbose("not an event");
        assert_eq!(logger.history(), vec!["event 2", "event 3", "event 4"]);
    }

    #[test]
    fn test_controller_choice_category() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.controller_choice("HEURISTIC", "Player places Herald in slot 1");
        let logs = logger.logs();
        assert_eq!(logs[0].category.as_deref(), Some("controller_choice"));
    }

    #[test]
    fn test_flush_buffer() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.normal("message 1");
        logger.flush_buffer();
        assert!(logger.logs().is_empty());
        assert_eq!(logger.history().len(), 1);
    }
}
