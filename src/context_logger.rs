//! Per-context logger binding every severity of a backend at once.

use std::sync::Arc;

use crate::config::EnhancerSettings;
use crate::enhancer::{EnhancedFn, LoggingEnhancer};
use crate::errors::EnhancerError;
use crate::interfaces::{LogArg, LogBackend, backend_fn};
use crate::level::Severity;

/// Logger for one context. Suppressed severities hold no function, so calls
/// at those levels cost nothing beyond the check.
#[derive(Debug, Clone)]
pub struct ContextLogger {
    context: String,
    trace: Option<EnhancedFn>,
    debug: Option<EnhancedFn>,
    log: Option<EnhancedFn>,
    info: Option<EnhancedFn>,
    warn: Option<EnhancedFn>,
    error: Option<EnhancedFn>,
}

impl ContextLogger {
    /// Enhance each of `backend`'s callables for `context`.
    #[must_use]
    pub fn new(
        enhancer: &LoggingEnhancer,
        backend: Arc<dyn LogBackend>,
        context: &str,
        settings: &EnhancerSettings,
    ) -> Self {
        let bind = |severity: Severity| {
            enhancer.enhance(
                backend_fn(Arc::clone(&backend), severity),
                severity,
                context,
                Some(&settings.config),
                &settings.datetime_pattern,
                &settings.prefix_pattern,
            )
        };
        Self {
            context: context.to_string(),
            trace: bind(Severity::Trace),
            debug: bind(Severity::Debug),
            log: bind(Severity::Log),
            info: bind(Severity::Info),
            warn: bind(Severity::Warn),
            error: bind(Severity::Error),
        }
    }

    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    fn slot(&self, severity: Severity) -> Option<&EnhancedFn> {
        match severity {
            Severity::Off => None,
            Severity::Trace => self.trace.as_ref(),
            Severity::Debug => self.debug.as_ref(),
            Severity::Log => self.log.as_ref(),
            Severity::Info => self.info.as_ref(),
            Severity::Warn => self.warn.as_ref(),
            Severity::Error => self.error.as_ref(),
        }
    }

    #[must_use]
    pub fn enabled(&self, severity: Severity) -> bool {
        self.slot(severity).is_some()
    }

    /// Emit at `severity`. `Ok(None)` means the call was suppressed.
    ///
    /// # Errors
    ///
    /// Returns substitution errors from the enhanced function.
    pub fn emit(
        &self,
        severity: Severity,
        args: Vec<LogArg>,
    ) -> Result<Option<Vec<LogArg>>, EnhancerError> {
        self.slot(severity).map(|f| f.call(args)).transpose()
    }

    /// # Errors
    ///
    /// See [`ContextLogger::emit`].
    pub fn trace(&self, args: Vec<LogArg>) -> Result<Option<Vec<LogArg>>, EnhancerError> {
        self.emit(Severity::Trace, args)
    }

    /// # Errors
    ///
    /// See [`ContextLogger::emit`].
    pub fn debug(&self, args: Vec<LogArg>) -> Result<Option<Vec<LogArg>>, EnhancerError> {
        self.emit(Severity::Debug, args)
    }

    /// # Errors
    ///
    /// See [`ContextLogger::emit`].
    pub fn log(&self, args: Vec<LogArg>) -> Result<Option<Vec<LogArg>>, EnhancerError> {
        self.emit(Severity::Log, args)
    }

    /// # Errors
    ///
    /// See [`ContextLogger::emit`].
    pub fn info(&self, args: Vec<LogArg>) -> Result<Option<Vec<LogArg>>, EnhancerError> {
        self.emit(Severity::Info, args)
    }

    /// # Errors
    ///
    /// See [`ContextLogger::emit`].
    pub fn warn(&self, args: Vec<LogArg>) -> Result<Option<Vec<LogArg>>, EnhancerError> {
        self.emit(Severity::Warn, args)
    }

    /// # Errors
    ///
    /// See [`ContextLogger::emit`].
    pub fn error(&self, args: Vec<LogArg>) -> Result<Option<Vec<LogArg>>, EnhancerError> {
        self.emit(Severity::Error, args)
    }
}
