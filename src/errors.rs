use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnhancerError {
    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),
}

/// Failures raised by the message substitution engine. The enhancer passes
/// these through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    #[error("missing argument for placeholder {0}")]
    MissingArgument(usize),

    #[error("named placeholder %({0})s requires a mapping argument")]
    MissingNamedSource(String),

    #[error("key '{0}' not found in mapping argument")]
    UnknownKey(String),

    #[error("named placeholders cannot be mixed with positional ones")]
    MixedNamedAndPositional,

    #[error("expected a number for %{conversion}, found {found}")]
    NotANumber { conversion: char, found: String },

    #[error("unterminated or unknown placeholder at byte {0}")]
    BadPlaceholder(usize),
}
