use crate::lexical::LexicalMetrics;
use crate::syntax::TranslationStats;
use std::time::Duration;

/// Outcome of translating one source file
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub source_name: String,
    pub stats: TranslationStats,
    pub lexical_metrics: LexicalMetrics,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        source_name: &str,
        stats: TranslationStats,
        lexical_metrics: LexicalMetrics,
        processing_duration: Duration,
    ) -> Self {
        Self {
            source_name: source_name.to_string(),
            stats,
            lexical_metrics,
            processing_duration,
        }
    }

    /// Completed with at least one reported diagnostic
    pub fn has_errors(&self) -> bool {
        self.stats.errors_reported > 0
    }

    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::EXPRESSION_TRANSLATED,
            "Source translated",
            "file" => &self.source_name,
            "expressions" => self.stats.expressions,
            "errors" => self.stats.errors_reported,
            "lines" => self.lexical_metrics.lines_read,
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
