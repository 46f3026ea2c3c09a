//! Per-source error collection with a cargo-style report

use super::events::LogEvent;
use crate::config::compile_time::logging::MAX_LOG_EVENTS_PER_FILE;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

/// Source currently being processed on this thread
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub failed_files: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    /// Events dropped once a file hit its per-file limit
    pub dropped_events: usize,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

#[derive(Default)]
struct FileRecord {
    events: Vec<LogEvent>,
    dropped: usize,
}

pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, FileRecord>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
        }
    }

    /// Record an event; beyond the per-file limit only a count is kept
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut files = self.file_events.lock().unwrap();
        let record = files.entry(file_path.to_path_buf()).or_default();

        if record.events.len() < MAX_LOG_EVENTS_PER_FILE {
            record.events.push(event);
        } else {
            record.dropped += 1;
        }
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        let files = self.file_events.lock().unwrap();
        files
            .get(file_path)
            .map(|record| record.events.clone())
            .unwrap_or_default()
    }

    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        self.get_file_events(file_path)
            .into_iter()
            .filter(|e| e.is_error())
            .collect()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let files = self.file_events.lock().unwrap();
        let mut summary = ProcessingSummary {
            total_files: files.len(),
            ..ProcessingSummary::default()
        };

        for record in files.values() {
            let errors = record.events.iter().filter(|e| e.is_error()).count();
            let warnings = record.events.iter().filter(|e| e.is_warning()).count();

            if errors > 0 {
                summary.failed_files += 1;
            }
            summary.total_errors += errors;
            summary.total_warnings += warnings;
            summary.dropped_events += record.dropped;
        }

        summary
    }

    pub fn clear(&self) {
        self.file_events.lock().unwrap().clear();
    }

    /// Cargo-style report of every collected error and warning
    pub fn format_report(&self) -> String {
        let files = self.file_events.lock().unwrap();
        let mut output = String::new();

        for (path, record) in files.iter() {
            for event in record.events.iter().filter(|e| e.is_error() || e.is_warning()) {
                let label = if event.is_error() { "error" } else { "warning" };
                output.push_str(&format!("{}[{}]: {}\n", label, event.code, event.message));

                match &event.span {
                    Some(span) => output.push_str(&format!(
                        "  --> {}:{}\n",
                        path.display(),
                        span.start()
                    )),
                    None => output.push_str(&format!("  --> {}\n", path.display())),
                }
            }

            if record.dropped > 0 {
                output.push_str(&format!(
                    "note: {} further events for {} were not kept\n",
                    record.dropped,
                    path.display()
                ));
            }
        }

        drop(files);
        let summary = self.get_summary();
        output.push_str(&format!(
            "{} error(s), {} warning(s) in {} file(s)",
            summary.total_errors, summary.total_warnings, summary.total_files
        ));

        output
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::{Position, Span};

    #[test]
    fn test_record_and_summarize() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("exprs.txt");

        collector.record_event(
            &path,
            LogEvent::error(codes::syntax::INVALID_EXPRESSION, "Invalid expression"),
        );
        collector.record_event(&path, LogEvent::warning("Error token"));
        collector.record_event(&PathBuf::from("clean.txt"), LogEvent::info("Opened"));

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
        assert_eq!(collector.get_file_errors(&path).len(), 1);
    }

    #[test]
    fn test_per_file_limit() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("noisy.txt");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 3 {
            collector.record_event(&path, LogEvent::warning("Error token"));
        }

        assert_eq!(collector.get_file_events(&path).len(), MAX_LOG_EVENTS_PER_FILE);
        assert_eq!(collector.get_summary().dropped_events, 3);
    }

    #[test]
    fn test_report_format() {
        let collector = ErrorCollector::new();
        let span = Span::new(Position::new(2, 1, 3), Position::new(3, 1, 4));
        collector.record_event(
            &PathBuf::from("a.txt"),
            LogEvent::error(codes::syntax::MISSING_CLOSE_PAREN, "Missing right parenthesis")
                .with_span(span),
        );

        let report = collector.format_report();
        assert!(report.contains("error[E041]: Missing right parenthesis"));
        assert!(report.contains("  --> a.txt:1:3"));
        assert!(report.ends_with("1 error(s), 0 warning(s) in 1 file(s)"));
    }
}
