// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    source: SourceLimits,
    lexical: LexicalLimits,
    translator: TranslatorLimits,
    listing: ListingLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct SourceLimits {
    max_source_line_length: usize,
    max_file_size: u64,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_digit_count: usize,
    max_word_length: usize,
}

#[derive(serde::Deserialize)]
struct TranslatorLimits {
    max_nesting_depth: usize,
    max_postfix_length: usize,
    max_syntax_errors: usize,
}

#[derive(serde::Deserialize)]
struct ListingLimits {
    max_print_line_length: usize,
    max_back_track_length: usize,
    max_lines_per_page: usize,
    continuation_indent: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=POSTFIX_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=POSTFIX_CONFIG_DIR");

    let profile = env::var("POSTFIX_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("POSTFIX_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the postfix_compiler directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    // u128 holds every 38-digit decimal
    const ABSOLUTE_MAX_DIGIT_COUNT: usize = 38;
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;

    if config.lexical.max_digit_count == 0
        || config.lexical.max_digit_count > ABSOLUTE_MAX_DIGIT_COUNT
    {
        panic!(
            "LIMITS: max_digit_count must be between 1 and {}",
            ABSOLUTE_MAX_DIGIT_COUNT
        );
    }

    if config.lexical.max_word_length == 0 {
        panic!("LIMITS: max_word_length must be positive");
    }

    if config.source.max_source_line_length < 2 {
        panic!("LIMITS: max_source_line_length must hold at least one byte");
    }

    if config.source.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.translator.max_nesting_depth == 0 || config.translator.max_postfix_length < 2 {
        panic!("LIMITS: translator limits must be positive");
    }

    if config.listing.max_back_track_length >= config.listing.max_print_line_length {
        panic!("LIMITS: max_back_track_length must be shorter than max_print_line_length");
    }

    if config.listing.max_lines_per_page == 0 {
        panic!("LIMITS: max_lines_per_page must be positive");
    }

    if config.logging.log_buffer_size == 0 || config.logging.max_log_events_per_file == 0 {
        panic!("LIMITS: logging buffers must be positive");
    }

    if profile == "production" {
        if config.translator.max_nesting_depth > 1024 {
            panic!("PRODUCTION: max_nesting_depth too high for production");
        }
        if config.source.max_file_size > 50_000_000 {
            panic!("PRODUCTION: max_file_size too high for production");
        }
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod source {{
        pub const MAX_SOURCE_LINE_LENGTH: usize = {};
        pub const MAX_FILE_SIZE: u64 = {};
    }}

    pub mod lexical {{
        pub const MAX_DIGIT_COUNT: usize = {};
        pub const MAX_WORD_LENGTH: usize = {};
    }}

    pub mod translator {{
        pub const MAX_NESTING_DEPTH: usize = {};
        pub const MAX_POSTFIX_LENGTH: usize = {};
        pub const MAX_SYNTAX_ERRORS: usize = {};
    }}

    pub mod listing {{
        pub const MAX_PRINT_LINE_LENGTH: usize = {};
        pub const MAX_BACK_TRACK_LENGTH: usize = {};
        pub const MAX_LINES_PER_PAGE: usize = {};
        pub const CONTINUATION_INDENT: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
    }}
}}

pub const BUILD_PROFILE: &str = "{}";
"#,
        profile,
        // Source
        config.source.max_source_line_length,
        config.source.max_file_size,
        // Lexical
        config.lexical.max_digit_count,
        config.lexical.max_word_length,
        // Translator
        config.translator.max_nesting_depth,
        config.translator.max_postfix_length,
        config.translator.max_syntax_errors,
        // Listing
        config.listing.max_print_line_length,
        config.listing.max_back_track_length,
        config.listing.max_lines_per_page,
        config.listing.continuation_indent,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_file,
        profile,
    );

    fs::write(output_path, constants_code).unwrap();
}
