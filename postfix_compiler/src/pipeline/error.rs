use crate::config::ConfigError;
use crate::lexical::LexerError;
use crate::listing::ListingError;
use crate::source::SourceError;
use crate::syntax::SyntaxError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to open source file: {0}")]
    Open(SourceError),

    #[error("Source read failed: {0}")]
    Read(#[from] SourceError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Translation failed: {0}")]
    Translation(#[from] SyntaxError),

    #[error("Output failed: {0}")]
    Output(#[from] ListingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::Open(e) | Self::Read(e) => e.error_code(),
            Self::LexicalAnalysis(e) => e.error_code(),
            Self::Translation(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }

    pub fn is_open_failure(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Process exit status for this failure
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Config(_) => 1,
            Self::Open(_) => 2,
            Self::Read(_) | Self::LexicalAnalysis(_) | Self::Translation(_) | Self::Output(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_exit_status() {
        let open = PipelineError::Open(SourceError::FileNotFound {
            path: "x".into(),
        });
        assert!(open.is_open_failure());
        assert_eq!(open.exit_status(), 2);
        assert_eq!(open.error_code(), codes::source::FILE_NOT_FOUND);

        let aborted: PipelineError = SyntaxError::TooManyErrors { count: 26 }.into();
        assert_eq!(aborted.exit_status(), 3);

        let config: PipelineError = ConfigError::Parse {
            path: "p.toml".into(),
            message: "bad".into(),
        }
        .into();
        assert_eq!(config.exit_status(), 1);
    }
}
