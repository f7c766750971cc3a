//! The call enhancer: filtering, prefixing and message substitution.
//!
//! [`LoggingEnhancer::enhance`] decides once, at creation time, whether a call
//! at a given severity in a given context is emitted at all. When it is, the
//! returned [`EnhancedFn`] prepends the composed prefix to every invocation,
//! substitutes the leading format string when it has placeholders, and hands
//! the result to the raw backend callable.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::LogConfig;
use crate::date_format::MomentFormatter;
use crate::errors::{EnhancerError, SubstitutionError};
use crate::interfaces::{
    BackendFn, Clock, DateFormatter, DateSupport, LogArg, Substitute, SubstitutionSupport,
};
use crate::level::Severity;
use crate::level_resolver;
use crate::prefix::PrefixComposer;
use crate::sprintf::{SprintfFormatter, placeholder};

#[derive(Clone)]
pub struct LoggingEnhancer {
    substitution: SubstitutionSupport,
    composer: PrefixComposer,
}

impl Default for LoggingEnhancer {
    /// Both optional dependencies present.
    fn default() -> Self {
        Self::new(
            Some(Arc::new(SprintfFormatter)),
            Some(Arc::new(MomentFormatter::default())),
        )
    }
}

impl LoggingEnhancer {
    /// Each dependency may be absent; fallbacks are fixed here, not per call.
    #[must_use]
    pub fn new(
        substitute: Option<Arc<dyn Substitute>>,
        dates: Option<Arc<dyn DateFormatter>>,
    ) -> Self {
        let substitution = SubstitutionSupport::from(substitute);
        Self {
            composer: PrefixComposer::new(DateSupport::from(dates), substitution.clone()),
            substitution,
        }
    }

    /// Clock for the legacy timestamp used when no date formatter is present.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.composer = self.composer.with_clock(clock);
        self
    }

    #[must_use]
    pub fn composer(&self) -> &PrefixComposer {
        &self.composer
    }

    /// Wrap `backend` for calls at `severity` from `context`.
    ///
    /// Returns `None` when the call must be skipped: the call is at `Off`, the
    /// resolved threshold is `Off`, or `severity` is below the threshold.
    #[must_use]
    pub fn enhance(
        &self,
        backend: BackendFn,
        severity: Severity,
        context: &str,
        config: Option<&LogConfig>,
        date_pattern: &str,
        prefix_template: &str,
    ) -> Option<EnhancedFn> {
        let threshold = level_resolver::resolve(context, config);
        if !level_resolver::passes(severity, threshold) {
            return None;
        }
        Some(EnhancedFn {
            backend,
            severity,
            threshold,
            context: context.to_string(),
            date_pattern: date_pattern.to_string(),
            prefix_template: prefix_template.to_string(),
            composer: self.composer.clone(),
            substitution: self.substitution.clone(),
        })
    }
}

/// A backend callable bound to one severity and context.
///
/// Immutable once built; the timestamp is recomputed on every call.
#[derive(Clone)]
pub struct EnhancedFn {
    backend: BackendFn,
    severity: Severity,
    threshold: Severity,
    context: String,
    date_pattern: String,
    prefix_template: String,
    composer: PrefixComposer,
    substitution: SubstitutionSupport,
}

impl fmt::Debug for EnhancedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnhancedFn")
            .field("severity", &self.severity)
            .field("threshold", &self.threshold)
            .field("context", &self.context)
            .field("date_pattern", &self.date_pattern)
            .field("prefix_template", &self.prefix_template)
            .finish_non_exhaustive()
    }
}

impl EnhancedFn {
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Threshold resolved for the context when this function was built.
    #[must_use]
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Invoke the backend once with `[prefix, ...args]` and return that list.
    ///
    /// # Errors
    ///
    /// Substitution failures (a bad template or arguments that do not fit the
    /// format string) are returned as-is and the backend is not invoked.
    pub fn call(&self, args: Vec<LogArg>) -> Result<Vec<LogArg>, EnhancerError> {
        let prefix =
            self.composer
                .compose(&self.date_pattern, &self.prefix_template, &self.context)?;
        let rest = self.substitute_message(args)?;

        let mut line = Vec::with_capacity(rest.len() + 1);
        line.push(Value::String(prefix));
        line.extend(rest);

        (self.backend)(&line);
        Ok(line)
    }

    /// Replace the leading format string and the arguments it consumes with
    /// the substituted message. Arguments past the consumed ones are kept in
    /// order.
    fn substitute_message(&self, args: Vec<LogArg>) -> Result<Vec<LogArg>, SubstitutionError> {
        let SubstitutionSupport::Present(engine) = &self.substitution else {
            return Ok(args);
        };
        let Some(Value::String(format)) = args.first() else {
            return Ok(args);
        };
        let shape = placeholder::scan(format);
        if shape.is_literal() {
            return Ok(args);
        }

        let consumed_end = shape.arity().saturating_add(1).min(args.len());
        let message = engine.substitute(format, &args[1..consumed_end])?;

        let mut out = Vec::with_capacity(args.len() + 1 - consumed_end);
        out.push(Value::String(message));
        out.extend(args.into_iter().skip(consumed_end));
        Ok(out)
    }
}
