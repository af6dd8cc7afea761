use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Broad failure classes. Every one of them aborts the whole conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InputOutput,
    MalformedInput,
    InvalidTimestamp,
}

#[derive(Error, Debug)]
pub enum DumpError {
    /// Bad flag, bad flag value, or an inconsistent flag combination.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid pattern for {flag}: {source}")]
    Pattern {
        flag: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("cannot read input '{path}': {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Malformed(#[from] MalformedInput),

    /// Either a record's `time_added` or a user supplied date string.
    #[error("invalid timestamp {value:?}")]
    InvalidTimestamp { value: String },
}

impl DumpError {
    pub fn config(msg: impl Into<String>) -> Self {
        DumpError::Configuration(msg.into())
    }

    pub fn timestamp(value: impl Into<String>) -> Self {
        DumpError::InvalidTimestamp { value: value.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DumpError::Configuration(_) | DumpError::Pattern { .. } => {
                ErrorKind::Configuration
            }
            DumpError::Input { .. } | DumpError::Output { .. } => {
                ErrorKind::InputOutput
            }
            DumpError::Malformed(_) => ErrorKind::MalformedInput,
            DumpError::InvalidTimestamp { .. } => ErrorKind::InvalidTimestamp,
        }
    }
}

/// Structural problems with the JSON dump.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MalformedInput {
    #[error("badly-formed JSON: error at position {offset}")]
    Syntax { offset: usize },

    #[error("badly-formed JSON: unexpected end of input")]
    Truncated,

    #[error("JSON contains an invalid value for the {field:?} field at position {offset}")]
    WrongType { field: String, offset: usize },

    #[error("JSON input cannot be empty")]
    Empty,
}
