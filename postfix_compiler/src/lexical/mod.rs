//! Lexical analysis
//!
//! [`Lexer`] turns line records from a [`SourceReader`](crate::source::SourceReader) into tokens on
//! demand, one byte of lookahead at a time. [`dump_tokens`] drives a lexer on
//! its own and prints each token, for inspecting what the scanner produces.

pub mod analyzer;
pub mod char_table;
mod dump;

pub use analyzer::{Lexer, LexerError, LexicalMetrics};
pub use char_table::{char_table, CharCode, CharTable, EOF_CHAR};
pub use dump::{
    dump_tokens, format_token_json, format_token_line, TokenDumpFormat, TokenDumpSummary,
    UNEXPECTED_EOF_MESSAGE,
};

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Check that every lexical error code is registered (for system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::INVALID_CHARACTER,
        crate::logging::codes::lexical::NUMBER_TOO_LONG,
        crate::logging::codes::lexical::WORD_TOO_LONG,
    ];

    for code in &lexical_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}
