//! Scanner with one byte of lookahead
//!
//! The lexer pulls line records from a [`SourceReader`] on demand and echoes
//! each record to the listing as it is fetched, so listing lines interleave
//! with whatever the translator prints for the tokens on them.

use super::char_table::{char_table, normalize, CharCode, CharTable, EOF_CHAR};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::listing::{ListingError, OutputSink};
use crate::logging::codes;
use crate::source::{SourceError, SourceReader};
use crate::tokens::{SpannedToken, Token, TokenKind};
use crate::utils::{Position, Span};
use crate::{log_debug, log_success, log_warning};
use std::collections::HashMap;
use std::io::BufRead;

#[derive(Debug, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("Number has {digits} digits (max {max})")]
    NumberTooLong { digits: usize, max: usize },

    #[error("Word is {length} characters long (max {max})")]
    WordTooLong { length: usize, max: usize },

    #[error("Invalid character: '{character}' at line {line}, column {column}")]
    InvalidCharacter {
        character: char,
        line: u32,
        column: u32,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Output(#[from] ListingError),
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::NumberTooLong { .. } => codes::lexical::NUMBER_TOO_LONG,
            LexerError::WordTooLong { .. } => codes::lexical::WORD_TOO_LONG,
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::Source(e) => e.error_code(),
            LexerError::Output(e) => e.error_code(),
        }
    }

    /// Reading or writing failed; scanning cannot continue
    pub fn is_fatal(&self) -> bool {
        matches!(self, LexerError::Source(_) | LexerError::Output(_))
    }
}

#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub error_tokens: usize,
    pub oversized_numbers: usize,
    pub oversized_words: usize,
    pub invalid_characters: usize,
    pub lines_read: u32,

    // Only filled when detailed metrics are enabled
    pub tokens_by_kind: HashMap<TokenKind, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;
        if token.is_error() {
            self.error_tokens += 1;
        }

        if preferences.collect_detailed_metrics {
            *self.tokens_by_kind.entry(token.kind()).or_insert(0) += 1;
        }
    }

    pub(crate) fn record_issue(&mut self, issue: &LexerError) {
        match issue {
            LexerError::NumberTooLong { .. } => self.oversized_numbers += 1,
            LexerError::WordTooLong { .. } => self.oversized_words += 1,
            LexerError::InvalidCharacter { .. } => self.invalid_characters += 1,
            _ => {}
        }
    }

    pub fn count_of(&self, kind: TokenKind) -> usize {
        self.tokens_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Scanner state: the current record, the lookahead byte and its position
pub struct Lexer<R> {
    reader: SourceReader<R>,
    table: &'static CharTable,
    line: Vec<u8>,
    cursor: usize,
    ch: u8,
    position: Position,
    offset: usize,
    primed: bool,
    echo_source: bool,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: SourceReader<R>) -> Self {
        Self {
            reader,
            table: char_table(),
            line: Vec::new(),
            cursor: 0,
            ch: EOF_CHAR,
            position: Position::start(),
            offset: 0,
            primed: false,
            echo_source: true,
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: LexicalPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Whether fetched records are echoed as listing lines
    pub fn with_source_echo(mut self, enabled: bool) -> Self {
        self.echo_source = enabled;
        self
    }

    /// Create a lexer and fetch the first character
    pub fn open(reader: SourceReader<R>, sink: &mut dyn OutputSink) -> Result<Self, LexerError> {
        let mut lexer = Self::new(reader);
        lexer.prime(sink)?;
        Ok(lexer)
    }

    /// Fetch the first character if that has not happened yet
    pub fn prime(&mut self, sink: &mut dyn OutputSink) -> Result<(), LexerError> {
        if !self.primed {
            self.primed = true;
            self.get_char(sink)?;
        }
        Ok(())
    }

    pub fn source_name(&self) -> &str {
        self.reader.name()
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Extract the next token. Once the source is exhausted every call
    /// returns `EndOfFile` again.
    pub fn next_token(&mut self, sink: &mut dyn OutputSink) -> Result<SpannedToken, LexerError> {
        self.prime(sink)?;
        self.skip_blanks(sink)?;

        let start = self.position;
        let (token, issue) = match self.table.classify(self.ch) {
            CharCode::Letter => self.scan_word(sink)?,
            CharCode::Digit => self.scan_number(sink)?,
            CharCode::EndOfInput => (Token::EndOfFile, None),
            CharCode::Special => self.scan_special(start, sink)?,
        };

        let span = match token {
            Token::EndOfFile => Span::point(start),
            _ => Span::new(start, self.position),
        };

        if let Some(issue) = issue {
            self.metrics.record_issue(&issue);
            if self.preferences.log_error_tokens {
                log_warning!(code = issue.error_code(), "Error token", span = span,
                    "reason" => &issue,
                    "lexeme" => token.lexeme()
                );
            }
        }

        self.metrics.record_token(&token, &self.preferences);
        log_debug!("Token",
            "kind" => token.kind().symbol_name(),
            "lexeme" => token.lexeme(),
            "at" => start
        );

        Ok(SpannedToken::new(token, span))
    }

    /// Log the end-of-scan summary
    pub fn log_completion(&self) {
        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization complete",
            "source" => self.reader.name(),
            "tokens" => self.metrics.total_tokens,
            "error_tokens" => self.metrics.error_tokens,
            "lines" => self.metrics.lines_read
        );
    }

    /// Advance the lookahead, fetching (and listing) a new record when the
    /// current one is used up
    fn get_char(&mut self, sink: &mut dyn OutputSink) -> Result<(), LexerError> {
        if self.cursor >= self.line.len() {
            if !self.reader.read_line(&mut self.line)? {
                let line = self.reader.line_number().max(1);
                self.ch = EOF_CHAR;
                self.position = Position::new(self.offset, line, self.cursor as u32 + 1);
                return Ok(());
            }

            self.cursor = 0;
            self.metrics.lines_read = self.reader.line_number();

            if self.echo_source {
                let text = String::from_utf8_lossy(&self.line);
                let text = text.trim_end_matches(['\n', '\r']);
                sink.list_source_line(self.reader.line_number(), text)?;
            }
        }

        let byte = self.line[self.cursor];
        self.position = Position::new(
            self.offset,
            self.reader.line_number(),
            self.cursor as u32 + 1,
        );
        self.cursor += 1;
        self.offset += 1;
        self.ch = normalize(byte);
        Ok(())
    }

    fn skip_blanks(&mut self, sink: &mut dyn OutputSink) -> Result<(), LexerError> {
        while self.ch == b' ' {
            self.get_char(sink)?;
        }
        Ok(())
    }

    fn scan_word(
        &mut self,
        sink: &mut dyn OutputSink,
    ) -> Result<(Token, Option<LexerError>), LexerError> {
        let mut text = String::new();
        let mut length = 0usize;

        while self.table.is_word_char(self.ch) {
            if length < MAX_WORD_LENGTH {
                text.push(char::from(self.ch));
            }
            length += 1;
            self.get_char(sink)?;
        }

        if length > MAX_WORD_LENGTH {
            let issue = LexerError::WordTooLong {
                length,
                max: MAX_WORD_LENGTH,
            };
            return Ok((Token::Error(text), Some(issue)));
        }

        Ok((Token::Word(text), None))
    }

    fn scan_number(
        &mut self,
        sink: &mut dyn OutputSink,
    ) -> Result<(Token, Option<LexerError>), LexerError> {
        let mut value: u128 = 0;
        let mut text = String::new();
        let mut digits = 0usize;

        while self.table.classify(self.ch) == CharCode::Digit {
            digits += 1;
            if digits <= MAX_DIGIT_COUNT {
                value = value * 10 + u128::from(self.ch - b'0');
            }
            if text.len() < MAX_WORD_LENGTH {
                text.push(char::from(self.ch));
            }
            self.get_char(sink)?;
        }

        if digits > MAX_DIGIT_COUNT {
            let issue = LexerError::NumberTooLong {
                digits,
                max: MAX_DIGIT_COUNT,
            };
            return Ok((Token::Error(text), Some(issue)));
        }

        Ok((Token::Number { value, text }, None))
    }

    fn scan_special(
        &mut self,
        start: Position,
        sink: &mut dyn OutputSink,
    ) -> Result<(Token, Option<LexerError>), LexerError> {
        let byte = self.ch;
        self.get_char(sink)?;

        match Token::from_special(byte) {
            Some(token) => Ok((token, None)),
            None => {
                let character = char::from(byte);
                let issue = LexerError::InvalidCharacter {
                    character,
                    line: start.line,
                    column: start.column,
                };
                Ok((Token::Error(character.to_string()), Some(issue)))
            }
        }
    }
}
