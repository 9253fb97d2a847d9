//! Error types for point cloud I/O.

use thiserror::Error;

/// Result type for point cloud I/O operations.
pub type CloudIoResult<T> = Result<T, CloudIoError>;

/// Errors that can occur while reading or writing point clouds.
#[derive(Debug, Error)]
pub enum CloudIoError {
    /// The file extension does not map to a supported format.
    #[error("unknown point cloud format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// The file is structurally invalid (bad header, truncated body, ...).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// A record on a specific line could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CloudIoError {
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
