//! Configuration for the postfix compiler
//!
//! Limits come from the TOML profile compiled in by `build.rs`
//! (`compile_time::*`); user-facing preferences live in [`runtime`].

// Generated from config/<profile>.toml at build time
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    ConfigError, LexicalPreferences, ListingPreferences, LogLevel, LoggingPreferences,
    RuntimeConfig, TranslatorPreferences,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Configuration profile the constants were generated from
    pub fn profile() -> &'static str {
        super::BUILD_PROFILE
    }

    pub fn config_dir() -> &'static str {
        option_env!("POSTFIX_CONFIG_DIR").unwrap_or("config")
    }

    /// Human readable origin of the compiled-in limits
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;
    use super::*;

    #[test]
    fn test_generated_limits_are_consistent() {
        assert!(lexical::MAX_DIGIT_COUNT > 0 && lexical::MAX_DIGIT_COUNT <= 38);
        assert!(listing::MAX_BACK_TRACK_LENGTH < listing::MAX_PRINT_LINE_LENGTH);
        assert!(source::MAX_SOURCE_LINE_LENGTH >= 2);
        assert!(translator::MAX_NESTING_DEPTH > 0);
    }

    #[test]
    fn test_build_info() {
        assert!(!build_info::profile().is_empty());
        assert!(build_info::source_info().ends_with(".toml"));
    }
}
