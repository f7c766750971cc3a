//! Effective threshold lookup for a context.
//!
//! Lookup is most-specific-first: `"a.b.c"`, then `"a.b"`, then `"a"`, then the
//! `"*"` wildcard, then the implicit `Trace` default.

use crate::config::{LogConfig, WILDCARD};
use crate::level::Severity;

/// Threshold used when neither the context nor the wildcard is configured.
pub const DEFAULT_THRESHOLD: Severity = Severity::Trace;

/// Resolve the threshold for `context`. `None` config means "nothing configured".
#[must_use]
pub fn resolve(context: &str, config: Option<&LogConfig>) -> Severity {
    let Some(levels) = config.and_then(|c| c.log_levels.as_ref()) else {
        return DEFAULT_THRESHOLD;
    };

    let mut name = context;
    while !name.is_empty() {
        if let Some(level) = levels.get(name) {
            return *level;
        }
        name = match name.rfind('.') {
            Some(idx) => &name[..idx],
            None => "",
        };
    }

    levels.get(WILDCARD).copied().unwrap_or(DEFAULT_THRESHOLD)
}

/// Whether a call at `call` clears `threshold`.
///
/// Calls at `Off` never pass, and an `Off` threshold silences everything.
#[must_use]
pub fn passes(call: Severity, threshold: Severity) -> bool {
    call != Severity::Off && threshold != Severity::Off && call >= threshold
}
