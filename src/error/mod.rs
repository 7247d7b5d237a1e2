//! Error handling module for reencoder

use thiserror::Error;

use crate::domain::errors::{DomainError, DomainErrorKind};

/// Main error type for reencoder operations
#[derive(Error, Debug)]
pub enum ReencodeError {
    /// Filename grammar or channel count rejected the input
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// External tool could not be located
    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// External tool failed to run or exited unsuccessfully
    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    /// Probe output could not be interpreted
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReencodeError {
    /// Process exit code for this error. Usage errors (2) are produced by clap.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReencodeError::Domain(e) => match e.kind() {
                DomainErrorKind::InvalidFilenameFormat => 3,
                DomainErrorKind::InvalidChannelCount => 4,
            },
            ReencodeError::InputFileNotFound { .. } => 5,
            _ => 1,
        }
    }
}

/// Result type alias for reencoder operations
pub type ReencodeResult<T> = std::result::Result<T, ReencodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_distinguish_domain_errors() {
        let filename: ReencodeError = DomainError::invalid_filename_format("bad").into();
        let channels: ReencodeError = DomainError::invalid_channel_count("3").into();
        let tool = ReencodeError::Tool {
            tool: "ffmpeg".to_string(),
            message: "exited with status 1".to_string(),
        };

        assert_eq!(filename.exit_code(), 3);
        assert_eq!(channels.exit_code(), 4);
        assert_eq!(tool.exit_code(), 1);
        assert_eq!(
            ReencodeError::InputFileNotFound { path: "x.mkv".to_string() }.exit_code(),
            5
        );
    }

    #[test]
    fn test_domain_error_message_is_preserved() {
        let err: ReencodeError =
            DomainError::invalid_channel_count("Unexpected channel count: 3").into();
        assert_eq!(
            err.to_string(),
            "Invalid channel count: Unexpected channel count: 3"
        );
    }
}
