use super::{ListingError, OutputSink};

/// Collects printed lines in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Lines starting with the postfix prompt
    pub fn postfix_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.starts_with(crate::emitter::POSTFIX_PROMPT))
            .collect()
    }

    /// Lines carrying a translator diagnostic
    pub fn diagnostics(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.starts_with(crate::syntax::DIAGNOSTIC_PREFIX))
            .collect()
    }
}

impl OutputSink for MemorySink {
    fn print_line(&mut self, line: &str) -> Result<(), ListingError> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_filters() {
        let mut sink = MemorySink::new();
        sink.list_source_line(1, "a+*b.").unwrap();
        sink.print_line("*** ERROR: Invalid expression.").unwrap();
        sink.print_line(">> a").unwrap();

        assert_eq!(sink.lines().len(), 3);
        assert_eq!(sink.postfix_lines(), vec![">> a"]);
        assert_eq!(sink.diagnostics(), vec!["*** ERROR: Invalid expression."]);
    }
}
