// Internal modules
pub mod config;
pub mod emitter;
pub mod lexical;
pub mod listing;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod source;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{Lexer, LexerError};
pub use listing::{Lister, MemorySink, OutputSink};
pub use pipeline::{translate_file, translate_str, PipelineError, PipelineResult};
pub use syntax::{SyntaxError, TranslationStats, Translator};

pub use pipeline::output::PipelineOutput;
