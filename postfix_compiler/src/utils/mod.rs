//! Shared location types used by the lexer, translator and logging

pub mod span;

pub use span::{Position, Span, Spanned};
