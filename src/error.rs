//! Error types for the experiment logger
//!
//! Every failure is surfaced to the caller as-is: there are no retries and no
//! fallback location. A `log` call that returns an error recorded nothing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Experiment logger error types
#[derive(Error, Debug)]
pub enum Error {
    /// Log directory could not be created at construction time
    #[error("cannot create log directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that was requested
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Configured log directory exists but is not a directory
    #[error("log directory path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Record file could not be written
    #[error("cannot write record {}: {source}\nThe run was not recorded", .path.display())]
    Write {
        /// Target record path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A record already exists at the derived path (never overwritten)
    #[error("record file already exists: {}\nThe run was not recorded", .0.display())]
    Collision(PathBuf),

    /// Record (de)serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed logger configuration
    #[error("invalid logger configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
