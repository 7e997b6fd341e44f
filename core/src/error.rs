use std::io;
use thiserror::Error;

use crate::entry::descriptor::DescriptorError;

/// Errors raised while building, reading or writing a mapping tree.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Invalid identity '{spec}': {reason}")]
    InvalidIdentity { spec: String, reason: String },

    #[error("Invalid descriptor: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("Unknown token '{0}'")]
    UnknownRecordKind(String),

    #[error("Malformed record '{line}': {reason}")]
    MalformedRecord { line: String, reason: String },

    /// A read that failed on a specific line. `line` is the 0-based index
    /// into the input sequence, header included.
    #[error("{path}:{line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl MappingError {
    /// Create an InvalidIdentity error
    pub fn invalid_identity(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentity {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create a MalformedRecord error
    pub fn malformed_record(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a line-level failure with the location it came from
    pub fn parse(path: impl Into<String>, line: usize, cause: &MappingError) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: cause.to_string(),
        }
    }

    /// Line index of a parse failure, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
