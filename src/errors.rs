/*!
 * Error types for the captext application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when driving the yt-dlp subprocess
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Error when the yt-dlp binary cannot be started
    #[error("Failed to launch yt-dlp: {0}")]
    LaunchFailed(String),

    /// Error when yt-dlp exits with a non-zero status
    #[error("yt-dlp exited with status {exit_code}: {message}")]
    ProcessFailed {
        /// Process exit code, -1 when terminated by a signal
        exit_code: i32,
        /// Filtered stderr output from yt-dlp
        message: String,
    },

    /// Error when parsing yt-dlp JSON output fails
    #[error("Failed to parse yt-dlp output: {0}")]
    ParseError(String),

    /// Error when yt-dlp does not finish within the allowed time
    #[error("yt-dlp timed out after {0} seconds")]
    Timeout(u64),

    /// Error when the requested caption file never appeared on disk
    #[error("No caption file produced: {0}")]
    MissingOutput(String),
}

/// Errors that can occur during caption extraction
#[derive(Error, Debug)]
pub enum ExtractionError {}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the caption downloader
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Error from caption extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
