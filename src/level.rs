//! Severity levels understood by the enhancer.
//!
//! Ordinals strictly increase from `Off` to `Error`. `Off` sits below every
//! active level, but a call made at `Off` is never emitted, and a context
//! configured with an `Off` threshold is silenced entirely.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::EnhancerError;

#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "SeverityRepr")]
pub enum Severity {
    Off = -1,
    Trace = 0,
    Debug = 1,
    Log = 2,
    Info = 3,
    Warn = 4,
    Error = 5,
}

impl Severity {
    /// Every level a backend exposes a callable for, lowest first.
    pub const ACTIVE: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Log,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    #[must_use]
    pub const fn ordinal(self) -> i8 {
        self as i8
    }

    /// Name of the backend callable for this level (`console`-style).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Log => "log",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Converts an ordinal back into a level.
    #[must_use]
    pub const fn from_ordinal(ordinal: i8) -> Option<Self> {
        match ordinal {
            -1 => Some(Severity::Off),
            0 => Some(Severity::Trace),
            1 => Some(Severity::Debug),
            2 => Some(Severity::Log),
            3 => Some(Severity::Info),
            4 => Some(Severity::Warn),
            5 => Some(Severity::Error),
            _ => None,
        }
    }
}

/// Configuration files may name a level or give its ordinal.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Name(String),
    Ordinal(i8),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = EnhancerError;

    fn try_from(repr: SeverityRepr) -> Result<Self, EnhancerError> {
        match repr {
            SeverityRepr::Name(name) => name.parse(),
            SeverityRepr::Ordinal(ordinal) => Severity::from_ordinal(ordinal)
                .ok_or_else(|| EnhancerError::InvalidSeverity(ordinal.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = EnhancerError;

    /// Parses a level name (case-insensitive, `warning` accepted) or an ordinal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(ordinal) = trimmed.parse::<i8>() {
            return Severity::from_ordinal(ordinal)
                .ok_or_else(|| EnhancerError::InvalidSeverity(s.to_string()));
        }
        match trimmed.to_lowercase().as_str() {
            "off" => Ok(Severity::Off),
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "log" => Ok(Severity::Log),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(EnhancerError::InvalidSeverity(s.to_string())),
        }
    }
}
