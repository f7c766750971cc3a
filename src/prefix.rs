//! Prefix composition: timestamp plus context, laid out by a template.
//!
//! The template sees exactly two values, the timestamp at position 1 and the
//! context name at position 2, so `"%s(%s): "` and `"%2$s(%1$s): "` both work.

use serde_json::Value;
use std::sync::Arc;

use crate::date_format::legacy::legacy_timestamp;
use crate::errors::SubstitutionError;
use crate::interfaces::{Clock, DateSupport, SubstitutionSupport, SystemClock};
use crate::sprintf::placeholder;

/// Template understood without a substitution engine: `timestamp:`
pub const LEGACY_DATE_ONLY: &str = "%s:";
/// Template understood without a substitution engine: `timestamp:context:`
pub const LEGACY_DATE_AND_CONTEXT: &str = "%s:%s:";

#[derive(Clone)]
pub struct PrefixComposer {
    dates: DateSupport,
    substitution: SubstitutionSupport,
    clock: Arc<dyn Clock>,
}

impl PrefixComposer {
    #[must_use]
    pub fn new(dates: DateSupport, substitution: SubstitutionSupport) -> Self {
        Self {
            dates,
            substitution,
            clock: Arc::new(SystemClock),
        }
    }

    /// Clock used for the legacy timestamp.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current timestamp for `date_pattern`.
    ///
    /// Without a date formatter the legacy `D-M-YYYY HH:mm:ss` layout is used
    /// whatever the pattern; with one, an empty pattern yields an empty string.
    #[must_use]
    pub fn timestamp(&self, date_pattern: &str) -> String {
        match &self.dates {
            DateSupport::Present(_) if date_pattern.is_empty() => String::new(),
            DateSupport::Present(formatter) => formatter.format_now(date_pattern),
            DateSupport::Absent => legacy_timestamp(&self.clock.now()),
        }
    }

    /// Build the prefix for one call.
    ///
    /// # Errors
    ///
    /// Surfaces whatever the substitution engine reports for a malformed template.
    pub fn compose(
        &self,
        date_pattern: &str,
        prefix_template: &str,
        context: &str,
    ) -> Result<String, SubstitutionError> {
        match &self.substitution {
            SubstitutionSupport::Present(engine) => {
                // no placeholders: leave the template (and any `%%`) alone
                if placeholder::scan(prefix_template).is_literal() {
                    return Ok(prefix_template.to_string());
                }
                let timestamp = self.timestamp(date_pattern);
                engine.substitute(
                    prefix_template,
                    &[Value::String(timestamp), Value::String(context.to_string())],
                )
            }
            SubstitutionSupport::Absent => {
                if date_pattern.is_empty() && prefix_template.is_empty() {
                    return Ok(String::new());
                }
                let timestamp = self.timestamp(date_pattern);
                Ok(match prefix_template {
                    LEGACY_DATE_ONLY => format!("{timestamp}:"),
                    LEGACY_DATE_AND_CONTEXT => format!("{timestamp}:{context}:"),
                    _ => format!("{timestamp}::[{context}]> "),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{MockClock, MockDateFormatter, MockSubstitute};
    use crate::sprintf::SprintfFormatter;
    use chrono::{Local, TimeZone};

    fn fixed_dates(output: &'static str) -> DateSupport {
        let mut dates = MockDateFormatter::new();
        dates.expect_format_now().returning(move |_| output.to_string());
        DateSupport::Present(Arc::new(dates))
    }

    fn sprintf() -> SubstitutionSupport {
        SubstitutionSupport::Present(Arc::new(SprintfFormatter))
    }

    fn fixed_clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_now().returning(|| {
            Local
                .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
                .single()
                .expect("unambiguous local time")
        });
        Arc::new(clock)
    }

    #[test]
    fn templates_reorder_timestamp_and_context() {
        let composer = PrefixComposer::new(fixed_dates("T"), sprintf());
        assert_eq!(composer.compose("hh", "%2$s(%1$s): ", "dummy").unwrap(), "dummy(T): ");
        assert_eq!(composer.compose("hh", "%s(%s): ", "dummy").unwrap(), "T(dummy): ");
        assert_eq!(composer.compose("hh", "%s: ", "dummy").unwrap(), "T: ");
        assert_eq!(composer.compose("hh", "%1$s: ", "dummy").unwrap(), "T: ");
        assert_eq!(composer.compose("hh", "%2$s: ", "dummy").unwrap(), "dummy: ");
        assert_eq!(composer.compose("hh", "", "dummy").unwrap(), "");
    }

    #[test]
    fn empty_pattern_gives_empty_timestamp() {
        let mut dates = MockDateFormatter::new();
        dates.expect_format_now().times(0);
        let composer = PrefixComposer::new(DateSupport::Present(Arc::new(dates)), sprintf());
        assert_eq!(composer.compose("", "%s|%s", "ctx").unwrap(), "|ctx");
        assert_eq!(composer.compose("", "%2$s", "with_wildcard").unwrap(), "with_wildcard");
    }

    #[test]
    fn placeholder_free_template_keeps_double_percent() {
        let mut engine = MockSubstitute::new();
        engine.expect_substitute().times(0);
        let composer =
            PrefixComposer::new(fixed_dates("T"), SubstitutionSupport::Present(Arc::new(engine)));
        assert_eq!(composer.compose("hh", "100%% > ", "ctx").unwrap(), "100%% > ");
    }

    #[test]
    fn engine_collapses_double_percent_when_invoked() {
        let composer = PrefixComposer::new(fixed_dates("T"), sprintf());
        assert_eq!(composer.compose("hh", "%s 100%% ", "ctx").unwrap(), "T 100% ");
    }

    #[test]
    fn engine_errors_surface() {
        let composer = PrefixComposer::new(fixed_dates("T"), sprintf());
        assert_eq!(
            composer.compose("hh", "%(when)s", "ctx").unwrap_err(),
            SubstitutionError::MissingNamedSource("when".to_string())
        );
    }

    #[test]
    fn legacy_templates_without_engine() {
        let composer = PrefixComposer::new(fixed_dates("2024"), SubstitutionSupport::Absent);
        assert_eq!(composer.compose("YYYY", "", "dummy").unwrap(), "2024::[dummy]> ");
        assert_eq!(composer.compose("YYYY", "%s:", "dummy").unwrap(), "2024:");
        assert_eq!(composer.compose("YYYY", "%s:%s:", "dummy").unwrap(), "2024:dummy:");
        assert_eq!(composer.compose("YYYY", "%2$s", "dummy").unwrap(), "2024::[dummy]> ");
        assert_eq!(composer.compose("", "", "dummy").unwrap(), "");
    }

    #[test]
    fn legacy_timestamp_without_date_formatter() {
        let composer =
            PrefixComposer::new(DateSupport::Absent, sprintf()).with_clock(fixed_clock());
        assert_eq!(composer.timestamp("YYYY"), "9-3-2024 14:05:07");
        assert_eq!(composer.timestamp(""), "9-3-2024 14:05:07");
        assert_eq!(
            composer.compose("YYYY", "%s:%s:", "dummy").unwrap(),
            "9-3-2024 14:05:07:dummy:"
        );
        assert_eq!(composer.compose("YYYY", "", "dummy").unwrap(), "");
    }
}
