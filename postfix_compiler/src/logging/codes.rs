//! Error and success codes with their classification metadata
//!
//! Every code that can appear in a log event is declared here together with
//! its category, severity and whether translation may continue after it.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Code attached to every log event, error or success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: Code,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code: code.as_str(),
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// Opening and reading the source text
pub mod source {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const NUMBER_TOO_LONG: Code = Code::new("E022");
    pub const WORD_TOO_LONG: Code = Code::new("E023");
}

pub mod syntax {
    use super::Code;

    pub const INVALID_EXPRESSION: Code = Code::new("E040");
    pub const MISSING_CLOSE_PAREN: Code = Code::new("E041");
    pub const MAX_NESTING_DEPTH: Code = Code::new("E042");
    pub const POSTFIX_OVERFLOW: Code = Code::new("E043");
    pub const TOO_MANY_ERRORS: Code = Code::new("E044");
}

pub mod listing {
    use super::Code;

    pub const OUTPUT_WRITE_FAILURE: Code = Code::new("E060");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const SOURCE_OPENED: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const EXPRESSION_TRANSLATED: Code = Code::new("I040");
    pub const TRANSLATION_COMPLETE: Code = Code::new("I041");
    pub const LISTING_COMPLETE: Code = Code::new("I060");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        use Severity::*;

        let entries = [
            // System
            ErrorMetadata::new(
                system::INTERNAL_ERROR,
                "System",
                Critical,
                false,
                true,
                "Internal translator error",
                "File a bug report with the source that triggered it",
            ),
            ErrorMetadata::new(
                system::INITIALIZATION_FAILURE,
                "System",
                Critical,
                false,
                true,
                "Logging or configuration initialization failure",
                "Check runtime configuration and environment variables",
            ),
            ErrorMetadata::new(
                system::CONFIGURATION_ERROR,
                "System",
                High,
                false,
                true,
                "Runtime configuration file could not be loaded",
                "Fix the TOML file passed with --config",
            ),
            // Source
            ErrorMetadata::new(
                source::FILE_NOT_FOUND,
                "Source",
                High,
                false,
                true,
                "Source file does not exist",
                "Check the source path",
            ),
            ErrorMetadata::new(
                source::FILE_TOO_LARGE,
                "Source",
                High,
                false,
                true,
                "Source file exceeds the configured size limit",
                "Split the source or raise max_file_size in the build profile",
            ),
            ErrorMetadata::new(
                source::PERMISSION_DENIED,
                "Source",
                High,
                false,
                true,
                "Source file is not readable",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                source::IO_ERROR,
                "Source",
                High,
                false,
                true,
                "Read failure while scanning the source",
                "Check the storage device and retry",
            ),
            ErrorMetadata::new(
                source::INVALID_PATH,
                "Source",
                High,
                false,
                true,
                "Source path is empty or not a regular file",
                "Pass a path to a regular text file",
            ),
            // Lexical
            ErrorMetadata::new(
                lexical::INVALID_CHARACTER,
                "Lexical",
                Medium,
                true,
                false,
                "Character is not part of the expression alphabet",
                "Remove the character",
            ),
            ErrorMetadata::new(
                lexical::NUMBER_TOO_LONG,
                "Lexical",
                Medium,
                true,
                false,
                "Integer literal has more digits than allowed",
                "Shorten the literal",
            ),
            ErrorMetadata::new(
                lexical::WORD_TOO_LONG,
                "Lexical",
                Medium,
                true,
                false,
                "Identifier exceeds the maximum word length",
                "Use a shorter identifier",
            ),
            // Syntax
            ErrorMetadata::new(
                syntax::INVALID_EXPRESSION,
                "Syntax",
                Medium,
                true,
                false,
                "Token cannot start or continue an expression",
                "Check operator and operand order",
            ),
            ErrorMetadata::new(
                syntax::MISSING_CLOSE_PAREN,
                "Syntax",
                Medium,
                true,
                false,
                "Parenthesized expression is not closed",
                "Add the missing ')'",
            ),
            ErrorMetadata::new(
                syntax::MAX_NESTING_DEPTH,
                "Syntax",
                Medium,
                true,
                false,
                "Parentheses nested deeper than allowed",
                "Flatten the expression",
            ),
            ErrorMetadata::new(
                syntax::POSTFIX_OVERFLOW,
                "Syntax",
                Medium,
                true,
                false,
                "Postfix output for one expression exceeds its capacity",
                "Split the expression",
            ),
            ErrorMetadata::new(
                syntax::TOO_MANY_ERRORS,
                "Syntax",
                High,
                false,
                true,
                "Syntax error budget exhausted",
                "Fix the reported errors and rerun",
            ),
            // Listing
            ErrorMetadata::new(
                listing::OUTPUT_WRITE_FAILURE,
                "Listing",
                Critical,
                false,
                true,
                "Listing output could not be written",
                "Check that stdout is writable",
            ),
            // Success
            ErrorMetadata::new(
                success::SYSTEM_INITIALIZATION_COMPLETED,
                "System",
                Low,
                true,
                false,
                "Logging initialized",
                "No action required",
            ),
            ErrorMetadata::new(
                success::SOURCE_OPENED,
                "Source",
                Low,
                true,
                false,
                "Source file opened",
                "No action required",
            ),
            ErrorMetadata::new(
                success::TOKENIZATION_COMPLETE,
                "Lexical",
                Low,
                true,
                false,
                "Token dump completed",
                "No action required",
            ),
            ErrorMetadata::new(
                success::EXPRESSION_TRANSLATED,
                "Syntax",
                Low,
                true,
                false,
                "Expression translated to postfix",
                "No action required",
            ),
            ErrorMetadata::new(
                success::TRANSLATION_COMPLETE,
                "Syntax",
                Low,
                true,
                false,
                "Translation run completed",
                "No action required",
            ),
            ErrorMetadata::new(
                success::LISTING_COMPLETE,
                "Listing",
                Low,
                true,
                false,
                "Source listing completed",
                "No action required",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Codes checked at logging initialization
pub(crate) fn critical_codes() -> [Code; 6] {
    [
        system::INTERNAL_ERROR,
        source::FILE_NOT_FOUND,
        lexical::NUMBER_TOO_LONG,
        syntax::INVALID_EXPRESSION,
        syntax::MISSING_CLOSE_PAREN,
        listing::OUTPUT_WRITE_FAILURE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_code_is_registered() {
        for code in critical_codes() {
            assert!(get_error_metadata(code.as_str()).is_some(), "{} missing", code);
        }
        assert!(get_error_metadata(success::TRANSLATION_COMPLETE.as_str()).is_some());
    }

    #[test]
    fn test_classification() {
        assert!(is_recoverable(syntax::INVALID_EXPRESSION.as_str()));
        assert!(!is_recoverable(syntax::TOO_MANY_ERRORS.as_str()));
        assert!(requires_halt(source::FILE_NOT_FOUND.as_str()));
        assert_eq!(get_category(lexical::NUMBER_TOO_LONG.as_str()), "Lexical");
        assert_eq!(get_severity(listing::OUTPUT_WRITE_FAILURE.as_str()), Severity::Critical);
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert!(is_recoverable("X999"));
        assert!(!requires_halt("X999"));
    }
}
