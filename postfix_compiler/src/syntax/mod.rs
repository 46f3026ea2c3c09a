//! Syntax-directed translation from infix to postfix
//!
//! [`Translator`] pulls tokens from a [`Lexer`] and writes one postfix line
//! per top-level expression to an [`OutputSink`], interleaved with any
//! diagnostics. Expressions are separated by `;` and the source ends at the
//! first `.` or at end of input.

mod error;
mod sync;
mod translator;

pub use error::{SyntaxError, SyntaxResult};
pub use sync::SyncSet;
pub use translator::{TranslationStats, Translator};

use crate::config::runtime::TranslatorPreferences;
use crate::lexical::Lexer;
use crate::listing::OutputSink;
use std::io::BufRead;

/// Leads every diagnostic line
pub const DIAGNOSTIC_PREFIX: &str = "*** ERROR";

/// Printed once the error budget is exhausted
pub const TOO_MANY_ERRORS_MESSAGE: &str = "Too many syntax errors. Aborted.";

/// Translate everything the lexer delivers into `sink`
pub fn translate<R: BufRead>(
    lexer: Lexer<R>,
    sink: &mut dyn OutputSink,
    preferences: TranslatorPreferences,
) -> SyntaxResult<TranslationStats> {
    Translator::new(lexer, sink)
        .with_preferences(preferences)
        .run()
}

/// Check that every syntax error code is registered (for system startup)
pub fn init_syntax_logging() -> Result<(), String> {
    let syntax_codes = [
        crate::logging::codes::syntax::INVALID_EXPRESSION,
        crate::logging::codes::syntax::MISSING_CLOSE_PAREN,
        crate::logging::codes::syntax::MAX_NESTING_DEPTH,
        crate::logging::codes::syntax::POSTFIX_OVERFLOW,
        crate::logging::codes::syntax::TOO_MANY_ERRORS,
    ];

    for code in &syntax_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::MemorySink;
    use crate::source::SourceReader;
    use std::io::Cursor;

    #[test]
    fn test_translate_function() {
        let reader = SourceReader::from_reader("test", Cursor::new(b"x*(y+z).".to_vec()));
        let mut sink = MemorySink::new();

        let stats = translate(Lexer::new(reader), &mut sink, TranslatorPreferences::default())
            .unwrap();

        assert_eq!(sink.postfix_lines(), vec![">> x y z + *"]);
        assert_eq!(stats.expressions, 1);
    }

    #[test]
    fn test_syntax_codes_registered() {
        assert!(init_syntax_logging().is_ok());
    }
}
