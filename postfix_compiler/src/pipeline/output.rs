use crate::syntax::TranslationStats;
use serde::{Deserialize, Serialize};

/// Lines produced by an in-memory translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub lines: Vec<String>,
    pub stats: TranslationStats,
}

impl PipelineOutput {
    pub fn new(lines: Vec<String>, stats: TranslationStats) -> Self {
        Self { lines, stats }
    }

    pub fn postfix_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.starts_with(crate::emitter::POSTFIX_PROMPT))
    }
}
