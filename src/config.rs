//! Level configuration and enhancer settings.
//!
//! Both are plain data supplied by the embedding application, either built in
//! code or read from JSON:
//!
//! ```json
//! {
//!   "datetimePattern": "dddd hh",
//!   "prefixPattern": "%s::[%s]> ",
//!   "logLevels": { "*": "WARN", "app.db": "TRACE" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::EnhancerError;
use crate::level::Severity;

/// Key of the global default threshold.
pub const WILDCARD: &str = "*";

/// Per-context thresholds. A missing `log_levels` map behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(rename = "logLevels", default, skip_serializing_if = "Option::is_none")]
    pub log_levels: Option<HashMap<String, Severity>>,
}

impl LogConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of a context threshold.
    #[must_use]
    pub fn with_level(mut self, context: &str, level: Severity) -> Self {
        self.set_level(context, level);
        self
    }

    pub fn set_level(&mut self, context: &str, level: Severity) {
        self.log_levels
            .get_or_insert_with(HashMap::new)
            .insert(context.to_string(), level);
    }

    /// Exact lookup, no hierarchy walk.
    #[must_use]
    pub fn level_for(&self, context: &str) -> Option<Severity> {
        self.log_levels.as_ref()?.get(context).copied()
    }

    /// Parse from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or names an unknown level.
    pub fn from_json_str(json: &str) -> Result<Self, EnhancerError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Everything a [`crate::context_logger::ContextLogger`] needs besides the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancerSettings {
    #[serde(rename = "datetimePattern", default)]
    pub datetime_pattern: String,

    #[serde(rename = "prefixPattern", default)]
    pub prefix_pattern: String,

    #[serde(flatten)]
    pub config: LogConfig,
}

impl EnhancerSettings {
    #[must_use]
    pub fn new(datetime_pattern: &str, prefix_pattern: &str, config: LogConfig) -> Self {
        Self {
            datetime_pattern: datetime_pattern.to_string(),
            prefix_pattern: prefix_pattern.to_string(),
            config,
        }
    }

    /// Parse settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed.
    pub fn from_json_str(json: &str) -> Result<Self, EnhancerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, EnhancerError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
