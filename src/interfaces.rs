use crate::errors::SubstitutionError;
use crate::level::Severity;
use chrono::{DateTime, Local};
use mockall::automock;
use serde_json::Value;
use std::sync::Arc;

/// One variadic logging argument.
pub type LogArg = Value;

/// A raw backend callable for a single severity. Its return value is ignored.
pub type BackendFn = Arc<dyn Fn(&[LogArg]) + Send + Sync>;

/// Source of the current instant, so timestamps can be pinned in tests
#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Date formatting capability: formats the current instant with a pattern
#[automock]
pub trait DateFormatter: Send + Sync {
    fn format_now(&self, pattern: &str) -> String;
}

/// Printf-style substitution capability
#[automock]
pub trait Substitute: Send + Sync {
    fn substitute(&self, format: &str, args: &[LogArg]) -> Result<String, SubstitutionError>;
}

/// Logging backend with one callable per severity
#[automock]
pub trait LogBackend: Send + Sync {
    fn trace(&self, args: &[LogArg]);
    fn debug(&self, args: &[LogArg]);
    fn log(&self, args: &[LogArg]);
    fn info(&self, args: &[LogArg]);
    fn warn(&self, args: &[LogArg]);
    fn error(&self, args: &[LogArg]);
}

/// Optional date formatting dependency, chosen once at construction
#[derive(Clone)]
pub enum DateSupport {
    Present(Arc<dyn DateFormatter>),
    /// Timestamps fall back to the fixed legacy layout
    Absent,
}

impl From<Option<Arc<dyn DateFormatter>>> for DateSupport {
    fn from(formatter: Option<Arc<dyn DateFormatter>>) -> Self {
        formatter.map_or(DateSupport::Absent, DateSupport::Present)
    }
}

/// Optional message substitution dependency, chosen once at construction
#[derive(Clone)]
pub enum SubstitutionSupport {
    Present(Arc<dyn Substitute>),
    /// Arguments and prefix templates are never substituted
    Absent,
}

impl From<Option<Arc<dyn Substitute>>> for SubstitutionSupport {
    fn from(engine: Option<Arc<dyn Substitute>>) -> Self {
        engine.map_or(SubstitutionSupport::Absent, SubstitutionSupport::Present)
    }
}

/// Default implementation of Clock that reads the local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Pick the backend callable matching `severity`.
///
/// `Off` has no callable of its own; it maps to a no-op since such calls are
/// never emitted anyway.
pub fn backend_fn(backend: Arc<dyn LogBackend>, severity: Severity) -> BackendFn {
    match severity {
        Severity::Off => Arc::new(|_: &[LogArg]| {}),
        Severity::Trace => Arc::new(move |args: &[LogArg]| backend.trace(args)),
        Severity::Debug => Arc::new(move |args: &[LogArg]| backend.debug(args)),
        Severity::Log => Arc::new(move |args: &[LogArg]| backend.log(args)),
        Severity::Info => Arc::new(move |args: &[LogArg]| backend.info(args)),
        Severity::Warn => Arc::new(move |args: &[LogArg]| backend.warn(args)),
        Severity::Error => Arc::new(move |args: &[LogArg]| backend.error(args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_fn_routes_to_matching_method() {
        let mut backend = MockLogBackend::new();
        backend
            .expect_warn()
            .withf(|args| args.len() == 2 && args[0] == json!("p") && args[1] == json!("msg"))
            .times(1)
            .return_const(());
        backend.expect_error().times(0);

        let warn = backend_fn(Arc::new(backend), Severity::Warn);
        warn(&[json!("p"), json!("msg")]);
    }
}
