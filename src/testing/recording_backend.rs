use crate::interfaces::{LogArg, LogBackend};
use crate::level::Severity;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Backend that keeps every call, so tests can count and inspect them.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<(Severity, Vec<LogArg>)>>>,
}

impl RecordingBackend {
    fn lock(&self) -> MutexGuard<'_, Vec<(Severity, Vec<LogArg>)>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, severity: Severity, args: &[LogArg]) {
        self.lock().push((severity, args.to_vec()));
    }

    pub fn calls(&self) -> Vec<(Severity, Vec<LogArg>)> {
        self.lock().clone()
    }

    /// Number of calls received at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.lock()
            .iter()
            .filter(|(level, _)| *level == severity)
            .count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl LogBackend for RecordingBackend {
    fn trace(&self, args: &[LogArg]) {
        self.record(Severity::Trace, args);
    }

    fn debug(&self, args: &[LogArg]) {
        self.record(Severity::Debug, args);
    }

    fn log(&self, args: &[LogArg]) {
        self.record(Severity::Log, args);
    }

    fn info(&self, args: &[LogArg]) {
        self.record(Severity::Info, args);
    }

    fn warn(&self, args: &[LogArg]) {
        self.record(Severity::Warn, args);
    }

    fn error(&self, args: &[LogArg]) {
        self.record(Severity::Error, args);
    }
}
