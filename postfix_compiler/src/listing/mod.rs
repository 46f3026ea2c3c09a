//! Output side of the translator
//!
//! Everything the translator produces (echoed source lines, postfix lines,
//! diagnostics) goes through an [`OutputSink`]. [`Lister`] is the paginated
//! printer used by the command line; [`MemorySink`] keeps lines in memory.

mod lister;
mod sink;

pub use lister::{Lister, ListingLimits};
pub use sink::MemorySink;

use crate::logging::codes;
use std::io;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListingError {
    #[error("Failed to write listing output: {message}")]
    Write { message: String },
}

impl ListingError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::listing::OUTPUT_WRITE_FAILURE
    }
}

impl From<io::Error> for ListingError {
    fn from(error: io::Error) -> Self {
        ListingError::Write {
            message: error.to_string(),
        }
    }
}

/// Lexical nesting level shown in source listings; expressions have no scopes
const LISTING_LEVEL: u32 = 0;

/// `"%4d %d: %s"` listing record for one source line
pub fn format_source_line(line_number: u32, text: &str) -> String {
    format!("{:4} {}: {}", line_number, LISTING_LEVEL, text)
}

/// Destination for listing, postfix and diagnostic lines
pub trait OutputSink {
    /// Print one logical line (without trailing newline)
    fn print_line(&mut self, line: &str) -> Result<(), ListingError>;

    /// Echo a source line as it is read
    fn list_source_line(&mut self, line_number: u32, text: &str) -> Result<(), ListingError> {
        self.print_line(&format_source_line(line_number, text))
    }

    fn flush(&mut self) -> Result<(), ListingError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_line_format() {
        assert_eq!(format_source_line(1, "a+b."), "   1 0: a+b.");
        assert_eq!(format_source_line(1234, ""), "1234 0: ");
    }

    #[test]
    fn test_io_error_conversion() {
        let error: ListingError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(error.to_string().contains("pipe closed"));
        assert_eq!(error.error_code(), codes::listing::OUTPUT_WRITE_FAILURE);
    }
}
