//! Error types for transcoding.

use thiserror::Error;

/// Result type for transcoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for transcoding.
///
/// Every error is fatal for the conversion that raised it: there is no
/// retry and no partial-output recovery. Output already written before
/// the failure stays on the stream; the exit code tells the caller the
/// result is unusable.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed JSON input, with the byte offset of the failure.
    #[error("JSON parse error at offset {offset}: {message}")]
    Json { offset: usize, message: String },

    /// Malformed YAML input, reported by the YAML parser.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] saphyr_parser::ScanError),

    /// A construct the target format cannot represent.
    #[error("{0}")]
    Unsupported(&'static str),

    /// Failure writing to the output stream.
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),

    /// Event sequence violated a structural invariant that the input
    /// parsers guarantee. Should be unreachable.
    #[error("internal consistency error: {0}")]
    Internal(&'static str),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Malformed input exits 21, unsupported constructs exit 1, and
    /// output or internal failures exit 20.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Json { .. } | Error::Yaml(_) => 21,
            Error::Unsupported(_) => 1,
            Error::Io(_) | Error::Internal(_) => 20,
        }
    }
}
