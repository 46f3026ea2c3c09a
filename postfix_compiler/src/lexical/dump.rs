//! Token-by-token dump of a source
use super::{Lexer, LexerError};
use crate::listing::OutputSink;
use crate::tokens::{SpannedToken, Token};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::BufRead;

pub const UNEXPECTED_EOF_MESSAGE: &str = "******* ERROR ******* Unexpected End of File";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenDumpFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenDumpSummary {
    pub tokens_printed: usize,
    pub reached_period: bool,
    pub unexpected_eof: bool,
}

/// `    >> <WORD>           abc`
pub fn format_token_line(token: &Token) -> String {
    let name = token.kind().symbol_name();
    match token {
        Token::Number { value, .. } => format!("    >> {:<16} {}", name, value),
        other => format!("    >> {:<16} {}", name, other.lexeme()),
    }
}

/// One JSON object per token; numbers carry their value as a string
pub fn format_token_json(token: &SpannedToken) -> String {
    let mut record = json!({
        "kind": token.value.kind().symbol_name(),
        "lexeme": token.value.lexeme(),
        "line": token.span.start.line,
        "column": token.span.start.column,
    });
    if let Token::Number { value, .. } = &token.value {
        record["value"] = Value::String(value.to_string());
    }
    record.to_string()
}

/// Print tokens until a period. Reaching end of input first prints
/// [`UNEXPECTED_EOF_MESSAGE`] instead of a token line.
pub fn dump_tokens<R: BufRead>(
    lexer: &mut Lexer<R>,
    sink: &mut dyn OutputSink,
    format: TokenDumpFormat,
) -> Result<TokenDumpSummary, LexerError> {
    let mut summary = TokenDumpSummary::default();

    loop {
        let token = lexer.next_token(sink)?;

        if token.value == Token::EndOfFile {
            summary.unexpected_eof = true;
            sink.print_line(UNEXPECTED_EOF_MESSAGE)?;
            break;
        }

        let line = match format {
            TokenDumpFormat::Text => format_token_line(&token.value),
            TokenDumpFormat::Json => format_token_json(&token),
        };
        sink.print_line(&line)?;
        summary.tokens_printed += 1;

        if token.value == Token::Period {
            summary.reached_period = true;
            break;
        }
    }

    lexer.log_completion();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::MemorySink;
    use crate::source::SourceReader;
    use std::io::Cursor;

    fn dump(text: &str, format: TokenDumpFormat) -> (Vec<String>, TokenDumpSummary) {
        let reader = SourceReader::from_reader("test", Cursor::new(text.as_bytes().to_vec()));
        let mut lexer = Lexer::new(reader).with_source_echo(false);
        let mut sink = MemorySink::new();
        let summary = dump_tokens(&mut lexer, &mut sink, format).unwrap();
        (sink.into_lines(), summary)
    }

    #[test]
    fn test_text_dump_until_period() {
        let (lines, summary) = dump("abc + 42. ignored", TokenDumpFormat::Text);

        assert_eq!(
            lines,
            vec![
                "    >> <WORD>           abc",
                "    >> <PLUS>           +",
                "    >> <NUMBER>         42",
                "    >> <PERIOD>         .",
            ]
        );
        assert!(summary.reached_period);
        assert_eq!(summary.tokens_printed, 4);
    }

    #[test]
    fn test_number_prints_its_value() {
        assert_eq!(
            format_token_line(&Token::Number {
                value: 7,
                text: "007".into()
            }),
            "    >> <NUMBER>         7"
        );
    }

    #[test]
    fn test_end_of_input_before_period() {
        let (lines, summary) = dump("a b", TokenDumpFormat::Text);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], UNEXPECTED_EOF_MESSAGE);
        assert!(summary.unexpected_eof);
        assert!(!summary.reached_period);
    }

    #[test]
    fn test_json_dump() {
        let (lines, _) = dump("x1 12.", TokenDumpFormat::Json);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["kind"], "<WORD>");
        assert_eq!(first["lexeme"], "x1");
        assert!(first.get("value").is_none());

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["value"], "12");
        assert_eq!(second["column"], 4);
    }
}
