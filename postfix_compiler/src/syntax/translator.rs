//! Recursive-descent infix to postfix translation
//!
//! ```text
//! expression        = simple_expression
//! simple_expression = term { ('+' | '-') term }
//! term              = factor { ('*' | '/') factor }
//! factor            = WORD | NUMBER | '(' expression ')'
//! ```
//!
//! Operands are emitted when `factor` recognizes them and each operator after
//! its right operand, so the call stack acts as the operator stack. A syntax
//! error unwinds every production back to [`Translator::run`]; whatever was
//! emitted before it stays in the postfix line.

use super::error::{SyntaxError, SyntaxResult};
use super::sync::SyncSet;
use super::{DIAGNOSTIC_PREFIX, TOO_MANY_ERRORS_MESSAGE};
use crate::config::compile_time::translator::{MAX_NESTING_DEPTH, MAX_SYNTAX_ERRORS};
use crate::config::runtime::TranslatorPreferences;
use crate::emitter::PostfixBuffer;
use crate::lexical::Lexer;
use crate::listing::OutputSink;
use crate::logging::codes;
use crate::tokens::{SpannedToken, Token};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// Counters for one translation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationStats {
    /// Postfix lines printed
    pub expressions: usize,
    /// Expressions translated without a diagnostic
    pub clean_expressions: usize,
    pub errors_reported: usize,
    pub tokens_read: usize,
    pub tokens_skipped: usize,
    /// Operands and operators written across all postfix lines
    pub atoms_emitted: usize,
    pub max_depth_reached: usize,
}

pub struct Translator<'s, R> {
    lexer: Lexer<R>,
    sink: &'s mut dyn OutputSink,
    current: SpannedToken,
    postfix: PostfixBuffer,
    sync: SyncSet,
    depth: usize,
    max_depth: usize,
    max_errors: usize,
    error_count: usize,
    preferences: TranslatorPreferences,
    stats: TranslationStats,
}

impl<'s, R: BufRead> Translator<'s, R> {
    pub fn new(lexer: Lexer<R>, sink: &'s mut dyn OutputSink) -> Self {
        Self {
            lexer,
            sink,
            current: SpannedToken::new(Token::EndOfFile, Span::dummy()),
            postfix: PostfixBuffer::default(),
            sync: SyncSet::statement_boundary(),
            depth: 0,
            max_depth: MAX_NESTING_DEPTH,
            max_errors: MAX_SYNTAX_ERRORS,
            error_count: 0,
            preferences: TranslatorPreferences::default(),
            stats: TranslationStats::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: TranslatorPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Lower the nesting bound below the compiled-in limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_NESTING_DEPTH);
        self
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_postfix_capacity(mut self, capacity: usize) -> Self {
        self.postfix = PostfixBuffer::new(capacity);
        self
    }

    pub fn stats(&self) -> &TranslationStats {
        &self.stats
    }

    pub fn lexer(&self) -> &Lexer<R> {
        &self.lexer
    }

    /// Translate expressions until a period or the end of input, printing
    /// one postfix line per expression. Recoverable errors are reported
    /// through the sink and do not fail the run.
    pub fn run(&mut self) -> SyntaxResult<TranslationStats> {
        self.lexer.prime(&mut *self.sink)?;

        loop {
            self.postfix.reset();
            self.depth = 0;
            self.advance()?;

            let clean = match self.expression() {
                Ok(()) => true,
                Err(error) if error.is_recoverable() => {
                    self.report(&error)?;
                    false
                }
                Err(error) => return Err(error),
            };

            self.sink.print_line(self.postfix.as_str())?;
            self.stats.expressions += 1;
            self.stats.atoms_emitted += self.postfix.atom_count();
            if clean {
                self.stats.clean_expressions += 1;
            }
            log_debug!("Expression translated",
                "postfix" => self.postfix.as_str(),
                "atoms" => self.postfix.atom_count(),
                "clean" => clean
            );

            self.synchronize(clean)?;
            if self.current.value.ends_translation() {
                break;
            }
        }

        self.sink.flush()?;
        log_success!(
            codes::success::TRANSLATION_COMPLETE,
            "Translation complete",
            "source" => self.lexer.source_name(),
            "expressions" => self.stats.expressions,
            "errors" => self.stats.errors_reported
        );
        Ok(self.stats.clone())
    }

    fn advance(&mut self) -> SyntaxResult<()> {
        self.current = self.lexer.next_token(&mut *self.sink)?;
        self.stats.tokens_read += 1;
        Ok(())
    }

    fn expression(&mut self) -> SyntaxResult<()> {
        self.simple_expression()
    }

    fn simple_expression(&mut self) -> SyntaxResult<()> {
        self.term()?;

        while self.current.value.is_additive_operator() {
            let operator = self.current.clone();

            self.advance()?;
            self.term()?;
            self.emit(&operator)?;
        }
        Ok(())
    }

    fn term(&mut self) -> SyntaxResult<()> {
        self.factor()?;

        while self.current.value.is_multiplicative_operator() {
            let operator = self.current.clone();

            self.advance()?;
            self.factor()?;
            self.emit(&operator)?;
        }
        Ok(())
    }

    fn factor(&mut self) -> SyntaxResult<()> {
        if let Some(atom) = self.current.value.operand_text() {
            let span = self.current.span;
            self.postfix
                .emit(atom)
                .map_err(|e| SyntaxError::postfix_overflow(e, span))?;
            return self.advance();
        }

        if self.current.value != Token::LeftParen {
            return Err(SyntaxError::invalid_expression(&self.current));
        }

        if self.depth >= self.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                max: self.max_depth,
                span: self.current.span,
            });
        }

        self.depth += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(self.depth);
        let result = self.parenthesized();
        self.depth -= 1;
        result
    }

    /// `( expression )` with the lookahead on the opening parenthesis
    fn parenthesized(&mut self) -> SyntaxResult<()> {
        self.advance()?;
        self.expression()?;

        if self.current.value != Token::RightParen {
            return Err(SyntaxError::missing_close_paren(&self.current));
        }
        self.advance()
    }

    fn emit(&mut self, operator: &SpannedToken) -> SyntaxResult<()> {
        self.postfix
            .emit(operator.value.lexeme())
            .map_err(|e| SyntaxError::postfix_overflow(e, operator.span))
    }

    /// Skip to the next synchronization token. Tokens skipped after a
    /// well-formed expression are trailing junk and each one is reported.
    fn synchronize(&mut self, report_skipped: bool) -> SyntaxResult<()> {
        let mut skipped = 0;

        while !self.sync.contains(self.current.value.kind()) {
            if report_skipped && self.preferences.report_skipped_tokens {
                let error = SyntaxError::invalid_expression(&self.current);
                self.report(&error)?;
            }
            skipped += 1;
            self.advance()?;
        }

        if skipped > 0 {
            log_debug!("Recovered at synchronization token",
                "token" => &self.current.value,
                "skipped" => skipped
            );
        }
        self.stats.tokens_skipped += skipped;
        Ok(())
    }

    /// Print a diagnostic line and charge it against the error budget
    fn report(&mut self, error: &SyntaxError) -> SyntaxResult<()> {
        self.error_count += 1;
        self.stats.errors_reported += 1;

        let mut line = format!("{}: {}", DIAGNOSTIC_PREFIX, error);
        if self.preferences.include_position_in_errors {
            if let Some(span) = error.span() {
                line.push_str(&format!(
                    " at line {}, column {}",
                    span.start.line, span.start.column
                ));
            }
        }
        line.push('.');
        self.sink.print_line(&line)?;

        match error.span() {
            Some(span) => log_error!(error.error_code(), "Syntax error", span = span,
                "reason" => error,
                "found" => error.found().unwrap_or("")
            ),
            None => log_error!(error.error_code(), "Syntax error", "reason" => error),
        }

        if self.error_count > self.max_errors {
            self.sink.print_line(TOO_MANY_ERRORS_MESSAGE)?;
            let error = SyntaxError::TooManyErrors {
                count: self.error_count,
            };
            log_error!(error.error_code(), "Translation aborted",
                "errors" => self.error_count,
                "limit" => self.max_errors
            );
            return Err(error);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::MemorySink;
    use crate::source::SourceReader;
    use assert_matches::assert_matches;
    use std::io::Cursor;

    fn lexer(text: &str) -> Lexer<Cursor<Vec<u8>>> {
        let reader = SourceReader::from_reader("test", Cursor::new(text.as_bytes().to_vec()));
        Lexer::new(reader).with_source_echo(false)
    }

    fn quiet() -> TranslatorPreferences {
        TranslatorPreferences {
            include_position_in_errors: false,
            report_skipped_tokens: true,
        }
    }

    fn translate(text: &str) -> (MemorySink, TranslationStats) {
        let mut sink = MemorySink::new();
        let stats = Translator::new(lexer(text), &mut sink)
            .with_preferences(quiet())
            .run()
            .unwrap();
        (sink, stats)
    }

    fn postfix(text: &str) -> Vec<String> {
        let (sink, _) = translate(text);
        sink.postfix_lines().into_iter().map(String::from).collect()
    }

    #[test]
    fn test_single_operand() {
        assert_eq!(postfix("x."), vec![">> x"]);
        assert_eq!(postfix("42."), vec![">> 42"]);
        assert_eq!(postfix("007."), vec![">> 007"]);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(postfix("a+b*c."), vec![">> a b c * +"]);
        assert_eq!(postfix("a*b+c."), vec![">> a b * c +"]);
        assert_eq!(postfix("a/b-c*d."), vec![">> a b / c d * -"]);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(postfix("(a+b)*c."), vec![">> a b + c *"]);
        assert_eq!(postfix("a*(b-(c/d))."), vec![">> a b c d / - *"]);
        assert_eq!(postfix("((x))."), vec![">> x"]);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(postfix("a-b-c."), vec![">> a b - c -"]);
        assert_eq!(postfix("a/b/c."), vec![">> a b / c /"]);
    }

    #[test]
    fn test_semicolon_separates_expressions() {
        let (sink, stats) = translate("a+b; c*d;\ne.");
        assert_eq!(sink.postfix_lines(), vec![">> a b +", ">> c d *", ">> e"]);
        assert!(sink.diagnostics().is_empty());
        assert_eq!(stats.expressions, 3);
        assert_eq!(stats.clean_expressions, 3);
        assert_eq!(stats.atoms_emitted, 7);
    }

    #[test]
    fn test_stops_at_period() {
        assert_eq!(postfix("a. b+c."), vec![">> a"]);
    }

    #[test]
    fn test_end_of_input_without_period() {
        let (sink, _) = translate("a+b");
        assert_eq!(sink.postfix_lines(), vec![">> a b +"]);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_partial_output_kept_on_error() {
        let (sink, stats) = translate("a+*b.");

        assert_eq!(sink.lines(), ["*** ERROR: Invalid expression.", ">> a"]);
        assert_eq!(stats.errors_reported, 1);
        assert_eq!(stats.tokens_skipped, 2);
        assert_eq!(stats.atoms_emitted, 1);
    }

    #[test]
    fn test_overlong_number_is_rejected() {
        let (sink, _) = translate("111111111111111111111+a.");
        assert_eq!(sink.diagnostics(), vec!["*** ERROR: Invalid expression."]);
        assert_eq!(sink.postfix_lines(), vec![">>"]);
    }

    #[test]
    fn test_twenty_digit_number_is_accepted() {
        let digits = "1".repeat(20);
        assert_eq!(postfix(&format!("{}.", digits)), vec![format!(">> {}", digits)]);
    }

    #[test]
    fn test_missing_right_parenthesis() {
        let (sink, _) = translate("(a+b.");
        assert_eq!(sink.lines(), ["*** ERROR: Missing right parenthesis.", ">> a b +"]);
    }

    #[test]
    fn test_empty_expression() {
        let (sink, _) = translate(".");
        assert_eq!(sink.lines(), ["*** ERROR: Invalid expression.", ">>"]);

        let (sink, _) = translate("");
        assert_eq!(sink.lines(), ["*** ERROR: Invalid expression.", ">>"]);
    }

    #[test]
    fn test_stray_right_parenthesis() {
        let (sink, _) = translate(")a.");
        assert_eq!(sink.lines(), ["*** ERROR: Invalid expression.", ">>"]);
    }

    #[test]
    fn test_trailing_tokens_are_each_reported() {
        let (sink, stats) = translate("a b c.");

        assert_eq!(
            sink.lines(),
            [
                ">> a",
                "*** ERROR: Invalid expression.",
                "*** ERROR: Invalid expression.",
            ]
        );
        assert_eq!(stats.clean_expressions, 1);
        assert_eq!(stats.tokens_skipped, 2);
    }

    #[test]
    fn test_trailing_tokens_silent_when_disabled() {
        let mut sink = MemorySink::new();
        Translator::new(lexer("a b c."), &mut sink)
            .with_preferences(TranslatorPreferences {
                include_position_in_errors: false,
                report_skipped_tokens: false,
            })
            .run()
            .unwrap();

        assert_eq!(sink.lines(), [">> a"]);
    }

    #[test]
    fn test_recovery_continues_after_semicolon() {
        let (sink, _) = translate("a+;b*c.");
        assert_eq!(
            sink.lines(),
            ["*** ERROR: Invalid expression.", ">> a", ">> b c *"]
        );
    }

    #[test]
    fn test_invalid_character_in_expression() {
        let (sink, _) = translate("a+@.");
        assert_eq!(sink.lines(), ["*** ERROR: Invalid expression.", ">> a"]);
    }

    #[test]
    fn test_position_suffix() {
        let mut sink = MemorySink::new();
        Translator::new(lexer("a+\n  *b."), &mut sink)
            .with_preferences(TranslatorPreferences {
                include_position_in_errors: true,
                report_skipped_tokens: true,
            })
            .run()
            .unwrap();

        assert_eq!(
            sink.diagnostics(),
            vec!["*** ERROR: Invalid expression at line 2, column 3."]
        );
    }

    #[test]
    fn test_nesting_depth_bound() {
        let mut sink = MemorySink::new();
        let stats = Translator::new(lexer("(((a))); ((b))."), &mut sink)
            .with_preferences(quiet())
            .with_max_depth(2)
            .run()
            .unwrap();

        assert_eq!(
            sink.lines(),
            [
                "*** ERROR: Expression nested too deeply (max 2).",
                ">>",
                ">> b",
            ]
        );
        assert_eq!(stats.max_depth_reached, 2);
    }

    #[test]
    fn test_postfix_overflow_is_recoverable() {
        let mut sink = MemorySink::new();
        Translator::new(lexer("a+b+c+d; e."), &mut sink)
            .with_preferences(quiet())
            .with_postfix_capacity(8)
            .run()
            .unwrap();

        assert_eq!(
            sink.lines(),
            [
                "*** ERROR: Postfix output too long (max 8 bytes).",
                ">> a b +",
                ">> e",
            ]
        );
    }

    #[test]
    fn test_too_many_errors_aborts() {
        let mut sink = MemorySink::new();
        let result = Translator::new(lexer("a b c d e."), &mut sink)
            .with_preferences(quiet())
            .with_max_errors(2)
            .run();

        assert_matches!(result, Err(SyntaxError::TooManyErrors { count: 3 }));
        assert_eq!(sink.diagnostics().len(), 3);
        assert_eq!(sink.lines().last().map(String::as_str), Some(TOO_MANY_ERRORS_MESSAGE));
    }

    #[test]
    fn test_listing_interleaves_with_output() {
        let reader = SourceReader::from_reader("test", Cursor::new(b"a+b;\nc.\n".to_vec()));
        let mut sink = MemorySink::new();
        Translator::new(Lexer::new(reader), &mut sink)
            .with_preferences(quiet())
            .run()
            .unwrap();

        assert_eq!(
            sink.lines(),
            ["   1 0: a+b;", ">> a b +", "   2 0: c.", ">> c"]
        );
    }

    #[test]
    fn test_translation_is_repeatable() {
        let text = "a+*b; (c-d)*e f; 123456789012345678901.";
        assert_eq!(translate(text).0.lines(), translate(text).0.lines());
    }
}
