use std::fs;
use std::path::PathBuf;

use super::types::Args;
use crate::level::Severity;

/// Checks that a settings file is readable and holds a JSON document
///
/// # Arguments
///
/// * `file` - Path to check
///
/// # Returns
///
/// * `Result<PathBuf, String>` - The validated PathBuf or an error message
pub fn check_settings_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() {
        return Err(format!("The file '{file}' is not readable."));
    }

    let contents =
        fs::read_to_string(&path).map_err(|e| format!("Unable to read '{file}': {e}"))?;
    serde_json::from_str::<serde_json::Value>(&contents)
        .map_err(|e| format!("Invalid JSON in '{file}': {e}"))?;

    Ok(path)
}

/// Parse a severity name or ordinal for clap
pub fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse::<Severity>().map_err(|e| e.to_string())
}

/// Validate the parsed arguments
///
/// # Errors
///
/// Returns an error if no message arguments were given.
pub fn validate(args: &Args) -> Result<(), String> {
    if args.message.is_empty() {
        return Err("at least one message argument is required".to_string());
    }
    Ok(())
}
