#![deny(missing_docs)]
//! Shared logging utilities for the yamldoc workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! the [`WarningSink`] capability through which the pipeline reports
//! recoverable failures, and a minimal test initializer for the global logger.

use std::sync::Mutex;

/// Prefix attached to every warning routed through [`LogWarningSink`].
pub const WARNING_PREFIX: &str = "yamldoc: ";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Receives human-readable warnings about recoverable failures.
pub trait WarningSink: Send + Sync {
    /// Records a single warning line.
    fn warn(&self, message: &str);
}

/// Default sink: routes warnings to the `log` facade.
///
/// When no logger accepting warnings has been installed the line is written
/// to stderr instead, so warnings are never silently dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWarningSink;

impl WarningSink for LogWarningSink {
    fn warn(&self, message: &str) {
        if log::log_enabled!(log::Level::Warn) {
            log::warn!("{WARNING_PREFIX}{message}");
        } else {
            eprintln!("{WARNING_PREFIX}{message}");
        }
    }
}

/// Sink that keeps every warning in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the warnings recorded so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// True when any recorded warning contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl WarningSink for CollectingSink {
    fn warn(&self, message: &str) {
        log::debug!("collected warning: {message}");
        match self.messages.lock() {
            Ok(mut guard) => guard.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{CollectingSink, WarningSink};

    #[test]
    fn collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        sink.warn("first");
        sink.warn("second problem");
        assert_eq!(sink.messages(), vec!["first", "second problem"]);
        assert!(sink.contains("problem"));
        assert!(!sink.contains("third"));
    }
}
