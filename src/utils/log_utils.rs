//! Diagnostics for the demo binary
//!
//! These go to stderr so they never mix with the log lines the binary emits.

/// Verbosity levels for the binary's own chatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Normal execution, no verbose flag
    Normal = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

/// Logger for application messages
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    /// Current verbosity level
    verbosity: u8,
}

impl Logger {
    /// Create a new logger with the specified verbosity
    #[must_use]
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    /// Whether a message at `level` would be printed
    #[must_use]
    pub fn enabled(&self, level: Verbosity) -> bool {
        self.verbosity >= level as u8
    }

    /// Log a message if the current verbosity level is at least the specified level
    pub fn log(&self, msg: &str, level: Verbosity) {
        if self.enabled(level) {
            match level {
                Verbosity::Normal => eprintln!("{msg}"),
                Verbosity::Info => eprintln!("info: {msg}"),
                Verbosity::Debug => eprintln!("dbg: {msg}"),
            }
        }
    }

    /// Log at info level (verbose >= 1)
    pub fn info(&self, msg: &str) {
        self.log(msg, Verbosity::Info);
    }

    /// Log at debug level (verbose >= 2)
    pub fn debug(&self, msg: &str) {
        self.log(msg, Verbosity::Debug);
    }

    /// Get current verbosity level
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }
}
