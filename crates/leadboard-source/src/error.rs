use leadboard_core::LeadId;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain or decode a payload. The grid shows these in place of rows.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("source responded with status {0}")]
    Status(u16),
    #[error("invalid source url: {0}")]
    InvalidUrl(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("duplicate lead id {0} in payload")]
    DuplicateId(LeadId),
    #[error("{0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Malformed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
