//! Token types shared by the lexer and translator
//!
//! The token set is small: operands (words and numbers), the four
//! arithmetic operators, parentheses, the two statement separators
//! (`;` and `.`), end of file, and an error token carrying whatever the
//! scanner could not accept.

pub mod token;

pub use token::{SpannedToken, Token, TokenKind};
