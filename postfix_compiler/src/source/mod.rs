//! Source text access

mod reader;

pub use reader::{SourceError, SourceReader};

/// Open a source file with the compiled-in limits
pub fn open_source(file_path: &str) -> Result<SourceReader<std::io::BufReader<std::fs::File>>, SourceError> {
    SourceReader::open(file_path)
}
