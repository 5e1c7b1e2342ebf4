//! Unified error types for the Longan filter.
//!
//! External tool invocations are the main source of failure here, so the
//! error type keeps enough context (program name, exit status, captured
//! stderr) for a useful diagnostic when a render goes wrong.
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Main error type for Longan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An external tool could not be found on PATH
    #[error("external tool not found: {0} (is it installed and on PATH?)")]
    ToolNotFound(String),

    /// An external tool ran but exited unsuccessfully
    #[error("{program} failed with {status}: {detail}")]
    ToolFailed {
        /// The program that was invoked
        program: String,
        /// Its exit status
        status: ExitStatus,
        /// Captured diagnostic output, trimmed to the interesting tail
        detail: String,
    },

    /// An external tool reported success but its output file is missing
    #[error("expected output file was not produced: {0}")]
    MissingOutput(PathBuf),
}

/// Result type for Longan operations.
pub type Result<T> = std::result::Result<T, Error>;
