pub mod args;
pub mod backend;
pub mod config;
pub mod context_logger;
pub mod date_format;
pub mod enhancer;
pub mod errors;
pub mod interfaces;
pub mod level;
pub mod level_resolver;
pub mod prefix;
pub mod sprintf;
pub mod start;
pub mod testing;
pub mod utils {
    pub mod log_utils;
}

pub use args::Args;
pub use config::{EnhancerSettings, LogConfig};
pub use context_logger::ContextLogger;
pub use enhancer::{EnhancedFn, LoggingEnhancer};
pub use errors::{EnhancerError, SubstitutionError};
pub use level::Severity;
pub use start::run_app;
