//! The crate's single public error type.
//!
//! Every fallible public operation returns `Result<T, Error>`. Builder
//! retries are handled internally and never surface unless the
//! growth-round budget is exhausted.

use thiserror::Error;

/// Errors returned by [`crate::Filter`] operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A constructor or configuration argument was out of range.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable description of the violated constraint.
        message: String,
    },

    /// The static builder exhausted its retry/growth budget without
    /// finding a peelable table.
    #[error("xor-filter build failed after {rounds} growth rounds")]
    BuildFailure {
        /// Number of growth rounds attempted before giving up.
        rounds: u32,
    },

    /// Persistence I/O failure (`save`/`load`).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file did not start with the expected magic bytes.
    #[error("invalid format: bad magic {found:02x?}")]
    InvalidFormat {
        /// The four magic bytes actually read.
        found: [u8; 4],
    },

    /// The file declared a format version this build does not understand.
    #[error("unsupported format version {version}")]
    UnsupportedVersion {
        /// The version field read from the file.
        version: u32,
    },

    /// The file was truncated or otherwise internally inconsistent.
    #[error("corrupt data: {reason}")]
    CorruptData {
        /// Human-readable description of what failed to parse.
        reason: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptData {
            reason: reason.into(),
        }
    }
}
