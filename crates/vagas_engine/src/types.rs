use std::fmt;

use vagas_core::Job;

use crate::DataSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    LoadCompleted(Result<LoadedJobs, FetchError>),
}

/// Parsed job list plus what the source said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedJobs {
    pub jobs: Vec<Job>,
    pub skipped: usize,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub source: DataSource,
    pub content_type: Option<String>,
    /// Raw `Last-Modified` header (or file mtime in the same format).
    pub last_modified: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidSource,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
    Io,
    Decode,
    Parse,
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidSource => write!(f, "invalid data source"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Decode => write!(f, "could not decode text"),
            FailureKind::Parse => write!(f, "malformed job list"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
