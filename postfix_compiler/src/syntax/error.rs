//! Translator errors with error code mapping
//!
//! Recoverable variants are reported as diagnostic lines and translation
//! resumes at the next synchronization token. The rest end the run.

use crate::emitter::EmitterError;
use crate::lexical::LexerError;
use crate::listing::ListingError;
use crate::logging::{codes, Code};
use crate::tokens::SpannedToken;
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Display text is what follows `*** ERROR: ` on a diagnostic line
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyntaxError {
    #[error("Invalid expression")]
    InvalidExpression { found: String, span: Span },

    #[error("Missing right parenthesis")]
    MissingCloseParen { found: String, span: Span },

    #[error("Expression nested too deeply (max {max})")]
    NestingTooDeep { max: usize, span: Span },

    #[error("Postfix output too long (max {capacity} bytes)")]
    PostfixOverflow { capacity: usize, span: Span },

    #[error("Too many syntax errors ({count})")]
    TooManyErrors { count: usize },

    #[error(transparent)]
    Lexer(#[from] LexerError),

    #[error(transparent)]
    Output(#[from] ListingError),
}

impl SyntaxError {
    /// Token cannot start or continue an expression
    pub fn invalid_expression(token: &SpannedToken) -> Self {
        Self::InvalidExpression {
            found: token.value.to_string(),
            span: token.span,
        }
    }

    pub fn missing_close_paren(token: &SpannedToken) -> Self {
        Self::MissingCloseParen {
            found: token.value.to_string(),
            span: token.span,
        }
    }

    pub fn postfix_overflow(error: EmitterError, span: Span) -> Self {
        match error {
            EmitterError::CapacityExceeded { capacity, .. } => {
                Self::PostfixOverflow { capacity, span }
            }
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::InvalidExpression { .. } => codes::syntax::INVALID_EXPRESSION,
            Self::MissingCloseParen { .. } => codes::syntax::MISSING_CLOSE_PAREN,
            Self::NestingTooDeep { .. } => codes::syntax::MAX_NESTING_DEPTH,
            Self::PostfixOverflow { .. } => codes::syntax::POSTFIX_OVERFLOW,
            Self::TooManyErrors { .. } => codes::syntax::TOO_MANY_ERRORS,
            Self::Lexer(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::InvalidExpression { span, .. }
            | Self::MissingCloseParen { span, .. }
            | Self::NestingTooDeep { span, .. }
            | Self::PostfixOverflow { span, .. } => Some(*span),
            Self::TooManyErrors { .. } | Self::Lexer(_) | Self::Output(_) => None,
        }
    }

    /// Lexeme of the offending token, if any
    pub fn found(&self) -> Option<&str> {
        match self {
            Self::InvalidExpression { found, .. } | Self::MissingCloseParen { found, .. } => {
                Some(found)
            }
            _ => None,
        }
    }

    /// Handled at the expression boundary
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidExpression { .. }
            | Self::MissingCloseParen { .. }
            | Self::NestingTooDeep { .. }
            | Self::PostfixOverflow { .. } => true,
            Self::TooManyErrors { .. } | Self::Lexer(_) | Self::Output(_) => false,
        }
    }

    pub fn requires_halt(&self) -> bool {
        !self.is_recoverable()
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;
    use crate::utils::Position;

    fn token(value: Token) -> SpannedToken {
        let start = Position::new(4, 1, 5);
        SpannedToken::new(value, Span::new(start, start.next_column()))
    }

    #[test]
    fn test_diagnostic_text() {
        let error = SyntaxError::invalid_expression(&token(Token::Star));
        assert_eq!(error.to_string(), "Invalid expression");
        assert_eq!(error.found(), Some("*"));

        let error = SyntaxError::missing_close_paren(&token(Token::Period));
        assert_eq!(error.to_string(), "Missing right parenthesis");
    }

    #[test]
    fn test_codes_and_recoverability() {
        let error = SyntaxError::invalid_expression(&token(Token::EndOfFile));
        assert_eq!(error.error_code(), codes::syntax::INVALID_EXPRESSION);
        assert!(error.is_recoverable());
        assert_eq!(error.span().map(|s| s.start.column), Some(5));
        assert_eq!(error.found(), Some("end of file"));

        let error = SyntaxError::TooManyErrors { count: 26 };
        assert_eq!(error.error_code(), codes::syntax::TOO_MANY_ERRORS);
        assert!(error.requires_halt());
        assert!(error.span().is_none());
    }

    #[test]
    fn test_overflow_from_emitter() {
        let span = Span::point(Position::start());
        let error = SyntaxError::postfix_overflow(
            EmitterError::CapacityExceeded {
                capacity: 16,
                required: 18,
            },
            span,
        );

        assert!(matches!(error, SyntaxError::PostfixOverflow { capacity: 16, .. }));
        assert!(error.is_recoverable());
        assert!(!error.description().is_empty());
    }
}
