//! Line-record reader over the source text

use crate::config::compile_time::source::{MAX_FILE_SIZE, MAX_SOURCE_LINE_LENGTH};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error reading '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid source path: {path}")]
    InvalidPath { path: String },
}

impl SourceError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SourceError::FileNotFound { .. } => codes::source::FILE_NOT_FOUND,
            SourceError::FileTooLarge { .. } => codes::source::FILE_TOO_LARGE,
            SourceError::PermissionDenied { .. } => codes::source::PERMISSION_DENIED,
            SourceError::Io { .. } => codes::source::IO_ERROR,
            SourceError::InvalidPath { .. } => codes::source::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    fn from_io(path: &str, error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => SourceError::FileNotFound {
                path: path.to_string(),
            },
            io::ErrorKind::PermissionDenied => SourceError::PermissionDenied {
                path: path.to_string(),
            },
            _ => SourceError::Io {
                path: path.to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Delivers the source as line records of at most
/// `MAX_SOURCE_LINE_LENGTH - 1` bytes each. A record ends after a newline
/// or when the limit is reached, so a longer physical line is split across
/// consecutive records.
#[derive(Debug)]
pub struct SourceReader<R> {
    inner: R,
    name: String,
    record_limit: usize,
    line_number: u32,
    bytes_read: u64,
    exhausted: bool,
}

impl SourceReader<BufReader<File>> {
    /// Open a source file for reading
    pub fn open(file_path: &str) -> Result<Self, SourceError> {
        let path = validate_path(file_path)?;

        let size = fs::metadata(path)
            .map_err(|e| report(SourceError::from_io(file_path, &e)))?
            .len();
        if size > MAX_FILE_SIZE {
            return Err(report(SourceError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            }));
        }

        let file = File::open(path).map_err(|e| report(SourceError::from_io(file_path, &e)))?;

        log_success!(
            codes::success::SOURCE_OPENED,
            "Source file opened",
            "path" => file_path,
            "size_bytes" => size
        );

        Ok(Self::from_reader(file_path, BufReader::new(file)))
    }
}

impl<R: BufRead> SourceReader<R> {
    /// Wrap any buffered reader; `name` is used in listings and logs
    pub fn from_reader(name: &str, inner: R) -> Self {
        Self {
            inner,
            name: name.to_string(),
            record_limit: MAX_SOURCE_LINE_LENGTH - 1,
            line_number: 0,
            bytes_read: 0,
            exhausted: false,
        }
    }

    /// Read the next line record into `buf`, replacing its contents.
    /// Returns `false` once the source is exhausted.
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<bool, SourceError> {
        buf.clear();
        if self.exhausted {
            return Ok(false);
        }

        loop {
            let available = match self.inner.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    let error = SourceError::Io {
                        path: self.name.clone(),
                        message: e.to_string(),
                    };
                    log_error!(error.error_code(), "Read failure",
                        "path" => &self.name,
                        "line" => self.line_number + 1
                    );
                    return Err(error);
                }
            };

            if available.is_empty() {
                break;
            }

            let room = self.record_limit - buf.len();
            let window = &available[..available.len().min(room)];
            let (take, complete) = match window.iter().position(|&b| b == b'\n') {
                Some(newline) => (newline + 1, true),
                None => (window.len(), window.len() == room),
            };

            buf.extend_from_slice(&window[..take]);
            self.inner.consume(take);

            if complete {
                break;
            }
        }

        if buf.is_empty() {
            self.exhausted = true;
            log_debug!("Source exhausted",
                "lines" => self.line_number,
                "bytes" => self.bytes_read
            );
            return Ok(false);
        }

        self.line_number += 1;
        self.bytes_read += buf.len() as u64;
        Ok(true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of records delivered so far
    pub fn line_number(&self) -> u32 {
        self.line_number
    }
}

fn report(error: SourceError) -> SourceError {
    log_error!(error.error_code(), "Cannot open source", "reason" => &error);
    error
}

fn validate_path(file_path: &str) -> Result<&Path, SourceError> {
    if file_path.is_empty() {
        return Err(report(SourceError::InvalidPath {
            path: file_path.to_string(),
        }));
    }

    let path = Path::new(file_path);

    if !path.exists() {
        return Err(report(SourceError::FileNotFound {
            path: file_path.to_string(),
        }));
    }

    if !path.is_file() {
        return Err(report(SourceError::InvalidPath {
            path: file_path.to_string(),
        }));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn records(text: &[u8]) -> Vec<Vec<u8>> {
        let mut reader = SourceReader::from_reader("test", Cursor::new(text.to_vec()));
        let mut buf = Vec::new();
        let mut out = Vec::new();
        while reader.read_line(&mut buf).unwrap() {
            out.push(buf.clone());
        }
        out
    }

    #[test]
    fn test_lines_keep_their_newline() {
        assert_eq!(
            records(b"a+b.\nc\n"),
            vec![b"a+b.\n".to_vec(), b"c\n".to_vec()]
        );
    }

    #[test]
    fn test_last_line_without_newline() {
        assert_eq!(records(b"a\nb"), vec![b"a\n".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_empty_source_has_no_records() {
        assert!(records(b"").is_empty());
    }

    #[test]
    fn test_long_line_is_split_into_records() {
        let limit = MAX_SOURCE_LINE_LENGTH - 1;
        let mut line = vec![b'x'; limit + 10];
        line.push(b'\n');

        let out = records(&line);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].len(), limit);
        assert_eq!(out[1].len(), 11);
    }

    #[test]
    fn test_line_numbers_and_exhaustion() {
        let mut reader = SourceReader::from_reader("test", Cursor::new(b"x\ny\n".to_vec()));
        let mut buf = Vec::new();

        assert!(reader.read_line(&mut buf).unwrap());
        assert!(reader.read_line(&mut buf).unwrap());
        assert_eq!(reader.line_number(), 2);
        assert!(!reader.read_line(&mut buf).unwrap());
        assert!(!reader.read_line(&mut buf).unwrap());
        assert_eq!(reader.line_number(), 2);
    }

    #[test]
    fn test_open_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exprs.txt");
        fs::write(&path, "a.\n").unwrap();

        let reader = SourceReader::open(path.to_str().unwrap()).unwrap();
        assert_eq!(reader.name(), path.to_str().unwrap());
    }

    #[test]
    fn test_open_failures() {
        assert_matches!(
            SourceReader::open("no/such/exprs.txt"),
            Err(SourceError::FileNotFound { .. })
        );
        assert_matches!(SourceReader::open(""), Err(SourceError::InvalidPath { .. }));

        let dir = tempdir().unwrap();
        assert_matches!(
            SourceReader::open(dir.path().to_str().unwrap()),
            Err(SourceError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_error_codes() {
        let error = SourceError::FileNotFound {
            path: "x".to_string(),
        };
        assert_eq!(error.error_code(), codes::source::FILE_NOT_FOUND);
        assert!(error.requires_halt());
    }
}
