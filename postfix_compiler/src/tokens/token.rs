//! Tokens of the infix expression language
use crate::utils::Spanned;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// Letter followed by letters and digits
    Word(String),
    /// Decimal integer literal; `text` is the digits as written
    Number { value: u128, text: String },

    // Specials
    Period,     // .
    Semicolon,  // ;
    LeftParen,  // (
    RightParen, // )
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /

    /// Sticky once the source is exhausted
    EndOfFile,
    /// Anything the scanner could not accept, with its raw lexeme
    Error(String),
}

/// Payload-free token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Word,
    Number,
    Period,
    Semicolon,
    LeftParen,
    RightParen,
    Plus,
    Minus,
    Star,
    Slash,
    EndOfFile,
    Error,
}

impl TokenKind {
    /// Name used by the token dump
    pub fn symbol_name(&self) -> &'static str {
        match self {
            TokenKind::Word => "<WORD>",
            TokenKind::Number => "<NUMBER>",
            TokenKind::Period => "<PERIOD>",
            TokenKind::Semicolon => "<SEMICOLON>",
            TokenKind::LeftParen => "<LPAREN>",
            TokenKind::RightParen => "<RPAREN>",
            TokenKind::Plus => "<PLUS>",
            TokenKind::Minus => "<MINUS>",
            TokenKind::Star => "<STAR>",
            TokenKind::Slash => "<SLASH>",
            TokenKind::EndOfFile => "<END OF FILE>",
            TokenKind::Error => "<ERROR>",
        }
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Word(_) => TokenKind::Word,
            Token::Number { .. } => TokenKind::Number,
            Token::Period => TokenKind::Period,
            Token::Semicolon => TokenKind::Semicolon,
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Star => TokenKind::Star,
            Token::Slash => TokenKind::Slash,
            Token::EndOfFile => TokenKind::EndOfFile,
            Token::Error(_) => TokenKind::Error,
        }
    }

    /// Map a special character to its token
    pub fn from_special(ch: u8) -> Option<Self> {
        match ch {
            b'.' => Some(Token::Period),
            b';' => Some(Token::Semicolon),
            b'(' => Some(Token::LeftParen),
            b')' => Some(Token::RightParen),
            b'+' => Some(Token::Plus),
            b'-' => Some(Token::Minus),
            b'*' => Some(Token::Star),
            b'/' => Some(Token::Slash),
            _ => None,
        }
    }

    /// Source text of the token (empty for end of file)
    pub fn lexeme(&self) -> &str {
        match self {
            Token::Word(text) | Token::Error(text) => text.as_str(),
            Token::Number { text, .. } => text.as_str(),
            Token::Period => ".",
            Token::Semicolon => ";",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::EndOfFile => "",
        }
    }

    /// Text emitted to postfix output when this token is an operand
    pub fn operand_text(&self) -> Option<&str> {
        match self {
            Token::Word(text) => Some(text.as_str()),
            Token::Number { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// `+` and `-`
    pub fn is_additive_operator(&self) -> bool {
        matches!(self, Token::Plus | Token::Minus)
    }

    /// `*` and `/`
    pub fn is_multiplicative_operator(&self) -> bool {
        matches!(self, Token::Star | Token::Slash)
    }

    /// Period and end of file stop the translation loop
    pub fn ends_translation(&self) -> bool {
        matches!(self, Token::Period | Token::EndOfFile)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Token::Error(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::EndOfFile => f.write_str("end of file"),
            other => f.write_str(other.lexeme()),
        }
    }
}

pub type SpannedToken = Spanned<Token>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_mapping() {
        assert_eq!(Token::from_special(b'.'), Some(Token::Period));
        assert_eq!(Token::from_special(b';'), Some(Token::Semicolon));
        assert_eq!(Token::from_special(b'/'), Some(Token::Slash));
        assert_eq!(Token::from_special(b'%'), None);
    }

    #[test]
    fn test_operand_text() {
        let number = Token::Number {
            value: 7,
            text: "007".to_string(),
        };
        assert_eq!(number.operand_text(), Some("007"));
        assert_eq!(Token::Word("abc".into()).operand_text(), Some("abc"));
        assert_eq!(Token::Plus.operand_text(), None);
    }

    #[test]
    fn test_operator_classes() {
        assert!(Token::Minus.is_additive_operator());
        assert!(!Token::Minus.is_multiplicative_operator());
        assert!(Token::Slash.is_multiplicative_operator());
        assert!(Token::Period.ends_translation());
        assert!(Token::EndOfFile.ends_translation());
        assert!(!Token::Semicolon.ends_translation());
    }

    #[test]
    fn test_symbol_names() {
        assert_eq!(Token::Word("x".into()).kind().symbol_name(), "<WORD>");
        assert_eq!(TokenKind::EndOfFile.symbol_name(), "<END OF FILE>");
        assert_eq!(Token::Error("#".into()).to_string(), "#");
    }
}
