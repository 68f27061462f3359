//! Error type for reading, filtering and writing CSV rows.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a filter run.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The input path could not be opened.
    #[error("cannot open input '{}': {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input has no header row.
    #[error("input is empty: expected a header row")]
    EmptyInput,

    /// The input is not well-formed delimited text, or could not be read.
    #[error("malformed input: {0}")]
    InputFormat(#[source] csv::Error),

    /// Writing a row to the output failed.
    #[error("failed to write output: {0}")]
    Output(#[source] csv::Error),

    /// Flushing or opening the output failed.
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    /// The filter name is not one of the registered predicates.
    #[error("unknown filter '{name}' (expected one of: {expected})")]
    InvalidFilterName { name: String, expected: String },
}

impl FilterError {
    /// True when the output consumer closed the pipe early.
    ///
    /// The binary treats this as a normal, silent exit.
    pub fn is_broken_pipe(&self) -> bool {
        let io_err = match self {
            FilterError::Io(e) => Some(e),
            FilterError::Output(e) => match e.kind() {
                csv::ErrorKind::Io(e) => Some(e),
                _ => None,
            },
            _ => None,
        };
        io_err.is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    }
}
