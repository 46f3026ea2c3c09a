//! End-to-end drivers: source file in, listing and postfix lines out
//!
//! Each driver sets the file context for log attribution, opens the source
//! and runs one stage chain against the given [`OutputSink`].

mod error;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::RuntimeConfig;
use crate::lexical::{dump_tokens, Lexer, TokenDumpFormat, TokenDumpSummary};
use crate::listing::{MemorySink, OutputSink};
use crate::logging::{self, codes};
use crate::source::{self, SourceReader};
use crate::syntax::Translator;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;
use std::time::Instant;

/// Name used for in-memory sources in listings and logs
pub const INLINE_SOURCE_NAME: &str = "<inline>";

fn open(file_path: &str) -> Result<SourceReader<BufReader<File>>, PipelineError> {
    source::open_source(file_path).map_err(PipelineError::Open)
}

fn lexer_for<R: BufRead>(reader: SourceReader<R>, config: &RuntimeConfig) -> Lexer<R> {
    Lexer::new(reader)
        .with_preferences(config.lexical.clone())
        .with_source_echo(config.listing.echo_source_lines)
}

fn run_translation<R: BufRead>(
    reader: SourceReader<R>,
    sink: &mut dyn OutputSink,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let source_name = reader.name().to_string();

    let mut translator = Translator::new(lexer_for(reader, config), sink)
        .with_preferences(config.translator.clone());
    let outcome = translator.run();
    let lexical_metrics = translator.lexer().metrics().clone();
    let stats = outcome?;

    let result = PipelineResult::new(&source_name, stats, lexical_metrics, start_time.elapsed());
    result.log_success();
    Ok(result)
}

/// Translate a source file, printing listing, diagnostics and postfix
/// lines to `sink`
pub fn translate_file(
    file_path: &str,
    sink: &mut dyn OutputSink,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting translation", "file" => file_path);
        let reader = open(file_path)?;
        run_translation(reader, sink, config)
    })
}

/// Translate source text held in memory
pub fn translate_str(text: &str, config: &RuntimeConfig) -> Result<PipelineOutput, PipelineError> {
    let reader = SourceReader::from_reader(INLINE_SOURCE_NAME, Cursor::new(text.as_bytes()));
    let mut sink = MemorySink::new();
    let result = run_translation(reader, &mut sink, config)?;
    Ok(PipelineOutput::new(sink.into_lines(), result.stats))
}

/// Print the tokens of a source file up to the first period
pub fn tokenize_file(
    file_path: &str,
    sink: &mut dyn OutputSink,
    config: &RuntimeConfig,
    format: TokenDumpFormat,
) -> Result<TokenDumpSummary, PipelineError> {
    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting token dump", "file" => file_path);
        let mut lexer = lexer_for(open(file_path)?, config);
        let summary = dump_tokens(&mut lexer, sink, format)?;
        sink.flush()?;
        Ok(summary)
    })
}

/// Print the source listing alone; returns the number of records listed
pub fn list_file(file_path: &str, sink: &mut dyn OutputSink) -> Result<u32, PipelineError> {
    logging::with_file_context(PathBuf::from(file_path), 0, || {
        let mut reader = open(file_path)?;
        list_records(&mut reader, sink)
    })
}

fn list_records<R: BufRead>(
    reader: &mut SourceReader<R>,
    sink: &mut dyn OutputSink,
) -> Result<u32, PipelineError> {
    let mut record = Vec::new();
    while reader.read_line(&mut record)? {
        let text = String::from_utf8_lossy(&record);
        sink.list_source_line(reader.line_number(), text.trim_end_matches(['\n', '\r']))?;
    }
    sink.flush()?;

    crate::log_success!(
        codes::success::LISTING_COMPLETE,
        "Listing complete",
        "file" => reader.name(),
        "lines" => reader.line_number()
    );
    Ok(reader.line_number())
}
