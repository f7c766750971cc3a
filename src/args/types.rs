use clap::Parser;
use std::path::PathBuf;

use super::validators::{check_settings_file, parse_severity, validate};
use crate::level::Severity;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON settings file with datetimePattern, prefixPattern and logLevels
    #[arg(short, long, value_name = "FILE", value_parser = check_settings_file)]
    pub config: Option<PathBuf>,

    /// Context name, dot-separated for hierarchical levels (e.g. app.db)
    #[arg(short = 'x', long, default_value = "")]
    pub context: String,

    /// Severity of the call: trace, debug, log, info, warn, error or off
    #[arg(short, long, default_value = "log", value_parser = parse_severity)]
    pub level: Severity,

    /// Date pattern for the prefix timestamp (overrides the settings file)
    #[arg(short, long, value_name = "PATTERN")]
    pub date_pattern: Option<String>,

    /// Prefix template; %1$s is the timestamp, %2$s the context (overrides the settings file)
    #[arg(short, long, value_name = "TEMPLATE")]
    pub prefix: Option<String>,

    /// Run without the printf-style substitution engine
    #[arg(long)]
    pub no_sprintf: bool,

    /// Run without the date formatter (legacy timestamps)
    #[arg(long)]
    pub no_dates: bool,

    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Message arguments; each one that parses as JSON is passed as JSON, otherwise as a string
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub message: Vec<String>,
}

impl Args {
    /// Validate the arguments
    ///
    /// # Errors
    ///
    /// Returns an error message if the arguments are invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate(self)
    }
}
