use serde_json::Value;
use std::sync::Arc;

use crate::Args;
use crate::backend::ConsoleBackend;
use crate::config::EnhancerSettings;
use crate::date_format::MomentFormatter;
use crate::enhancer::LoggingEnhancer;
use crate::errors::EnhancerError;
use crate::interfaces::{DateFormatter, LogArg, Substitute, backend_fn};
use crate::sprintf::SprintfFormatter;
use crate::utils::log_utils::Logger;

/// A message argument from the command line: JSON when it parses, else a string.
#[must_use]
pub fn parse_message_arg(raw: &str) -> LogArg {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Settings from `--config`, with the pattern flags applied on top.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or parsed.
pub fn load_settings(args: &Args, logger: &Logger) -> Result<EnhancerSettings, EnhancerError> {
    let mut settings = match &args.config {
        Some(path) => {
            logger.info(&format!("Reading settings from {}", path.display()));
            EnhancerSettings::from_json_file(path)?
        }
        None => EnhancerSettings::default(),
    };

    if let Some(pattern) = &args.date_pattern {
        settings.datetime_pattern.clone_from(pattern);
    }
    if let Some(template) = &args.prefix {
        settings.prefix_pattern.clone_from(template);
    }
    logger.debug(&format!("Effective settings: {settings:?}"));
    Ok(settings)
}

/// Build the enhancer with the optional dependencies the flags leave in place.
#[must_use]
pub fn build_enhancer(args: &Args) -> LoggingEnhancer {
    let substitute: Option<Arc<dyn Substitute>> =
        (!args.no_sprintf).then(|| Arc::new(SprintfFormatter) as Arc<dyn Substitute>);
    let dates: Option<Arc<dyn DateFormatter>> = (!args.no_dates)
        .then(|| Arc::new(MomentFormatter::default()) as Arc<dyn DateFormatter>);
    LoggingEnhancer::new(substitute, dates)
}

/// Emit one enhanced call to the console.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded or the message cannot be
/// substituted.
pub fn run_app(args: &Args) -> Result<(), EnhancerError> {
    let logger = Logger::new(args.verbose);
    let settings = load_settings(args, &logger)?;
    let enhancer = build_enhancer(args);

    let Some(enhanced) = enhancer.enhance(
        backend_fn(Arc::new(ConsoleBackend), args.level),
        args.level,
        &args.context,
        Some(&settings.config),
        &settings.datetime_pattern,
        &settings.prefix_pattern,
    ) else {
        logger.info(&format!(
            "{} is suppressed for context '{}'",
            args.level, args.context
        ));
        return Ok(());
    };

    logger.debug(&format!(
        "{} passes threshold {} for context '{}'",
        enhanced.severity(),
        enhanced.threshold(),
        enhanced.context()
    ));
    let message = args.message.iter().map(|m| parse_message_arg(m)).collect();
    enhanced.call(message)?;
    Ok(())
}
