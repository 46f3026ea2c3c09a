// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::logging::codes::{self, Code};

/// Read an environment override, falling back when unset or unparsable
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to count tokens by kind while scanning
    pub collect_detailed_metrics: bool,

    /// Whether to log a warning for every error token produced
    pub log_error_tokens: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_or(env_vars::LEXICAL_DETAILED_METRICS, true),
            log_error_tokens: env_or(env_vars::LEXICAL_LOG_ERROR_TOKENS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorPreferences {
    /// Append "at line L, column C" to diagnostic lines
    pub include_position_in_errors: bool,

    /// Report each token discarded after a well-formed expression
    pub report_skipped_tokens: bool,
}

impl Default for TranslatorPreferences {
    fn default() -> Self {
        Self {
            include_position_in_errors: env_or(env_vars::TRANSLATOR_INCLUDE_POSITIONS, false),
            report_skipped_tokens: env_or(env_vars::TRANSLATOR_REPORT_SKIPPED, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingPreferences {
    /// Emit page headers every page length
    pub enable_pagination: bool,

    /// Forward each source line to the listing as it is read
    pub echo_source_lines: bool,
}

impl Default for ListingPreferences {
    fn default() -> Self {
        Self {
            enable_pagination: env_or(env_vars::LISTING_PAGINATE, true),
            echo_source_lines: env_or(env_vars::LISTING_ECHO_SOURCE, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether log events are written to stderr at all
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,

    /// Whether to collect error events per source file
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_or(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_or(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_file_context: env_or(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (environment variables and the CLI)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Failure to load a runtime configuration file
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration in '{path}': {message}")]
    Parse { path: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> Code {
        codes::system::CONFIGURATION_ERROR
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub translator: TranslatorPreferences,
    pub listing: ListingPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Load preferences from a TOML file; missing sections keep their defaults
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "POSTFIX_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_LOG_ERROR_TOKENS: &str = "POSTFIX_LEXICAL_LOG_ERROR_TOKENS";

    // Translator
    pub const TRANSLATOR_INCLUDE_POSITIONS: &str = "POSTFIX_TRANSLATOR_INCLUDE_POSITIONS";
    pub const TRANSLATOR_REPORT_SKIPPED: &str = "POSTFIX_TRANSLATOR_REPORT_SKIPPED";

    // Listing
    pub const LISTING_PAGINATE: &str = "POSTFIX_LISTING_PAGINATE";
    pub const LISTING_ECHO_SOURCE: &str = "POSTFIX_LISTING_ECHO_SOURCE";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "POSTFIX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "POSTFIX_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "POSTFIX_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "POSTFIX_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            "[translator]\ninclude_position_in_errors = true\n\n[listing]\nenable_pagination = false\n",
        )
        .unwrap();

        assert!(config.translator.include_position_in_errors);
        assert!(!config.listing.enable_pagination);
        assert_eq!(
            config.lexical.collect_detailed_metrics,
            LexicalPreferences::default().collect_detailed_metrics
        );
    }

    #[test]
    fn test_log_level_in_toml() {
        let config = RuntimeConfig::from_toml_str("[logging]\nmin_log_level = \"debug\"\n").unwrap();
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = RuntimeConfig::from_toml_str("[listing\nenable_pagination = ");
        assert_matches!(result, Err(ConfigError::Parse { .. }));
    }

    #[test]
    fn test_config_file_loading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lexical]\nlog_error_tokens = false").unwrap();

        let config = RuntimeConfig::from_toml_file(file.path()).unwrap();
        assert!(!config.lexical.log_error_tokens);

        let missing = RuntimeConfig::from_toml_file("/nonexistent/postfix.toml");
        assert_matches!(missing, Err(ConfigError::Io { .. }));
    }
}
