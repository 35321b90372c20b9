//! Error types for the data-loader crate.
//!
//! Every variant is terminal for the caller: a dataset that fails to load
//! is never partially used.

use thiserror::Error;

/// Errors that can occur while loading the movies and ratings tables
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A row in a data file couldn't be parsed
    ///
    /// `line` is the 1-based line number in the source, header included.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// The header row lacks a column the pipeline needs
    #[error("Schema error in {file}: missing required column '{column}'")]
    SchemaError { file: String, column: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
