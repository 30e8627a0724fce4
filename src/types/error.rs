//! Error types for the sales analytics engine
//!
//! This module defines all error types that can occur while running the
//! pipeline. Errors are designed to be descriptive and user-friendly for
//! CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: Input file missing, write failures, etc.
//! - **Parse Errors**: Malformed input lines (recoverable; the line is
//!   dropped and processing continues)
//! - **Catalog Errors**: Product catalog fetch failures (degraded to an
//!   empty mapping by the pipeline, never fatal)

use thiserror::Error;

/// Main error type for the sales analytics engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SalesError {
    /// Input file not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// A line of the input file could not be parsed
    ///
    /// This is a recoverable error - the malformed line is skipped
    /// and processing continues with the next line.
    #[error("Parse error{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parse failure
        message: String,
    },

    /// Product catalog fetch failed
    ///
    /// The pipeline degrades this to an empty product mapping; all
    /// transactions then come out unmatched.
    #[error("Catalog fetch failed: {message}")]
    Catalog {
        /// Description of the HTTP or decode failure
        message: String,
    },
}

// Conversion from io::Error to SalesError
impl From<std::io::Error> for SalesError {
    fn from(error: std::io::Error) -> Self {
        SalesError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SalesError
impl From<csv::Error> for SalesError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        SalesError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Conversion from reqwest::Error to SalesError
impl From<reqwest::Error> for SalesError {
    fn from(error: reqwest::Error) -> Self {
        SalesError::Catalog {
            message: error.to_string(),
        }
    }
}

impl SalesError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        SalesError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a Parse error with an optional line number
    pub fn parse(line: Option<u64>, message: impl Into<String>) -> Self {
        SalesError::Parse {
            line,
            message: message.into(),
        }
    }
}
