// Domain errors - Error types for the domain layer

use std::fmt;

/// The two failure kinds the domain layer can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainErrorKind {
    /// The file name matches neither naming grammar
    InvalidFilenameFormat,
    /// No audio track, or the maximum channel count has no profile
    InvalidChannelCount,
}

impl fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainErrorKind::InvalidFilenameFormat => write!(f, "Invalid filename format"),
            DomainErrorKind::InvalidChannelCount => write!(f, "Invalid channel count"),
        }
    }
}

/// Domain-specific error carrying its kind and a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    kind: DomainErrorKind,
    message: String,
}

impl DomainError {
    pub fn new(kind: DomainErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_filename_format(message: impl Into<String>) -> Self {
        Self::new(DomainErrorKind::InvalidFilenameFormat, message)
    }

    pub fn invalid_channel_count(message: impl Into<String>) -> Self {
        Self::new(DomainErrorKind::InvalidChannelCount, message)
    }

    pub fn kind(&self) -> DomainErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for DomainError {}
