//! Typed errors for initialization and report assembly.
//!
//! Per-probe failures in the `seo` and `performance` pipelines are not
//! errors at this level: they are downgraded to error-shaped fields inside
//! the report so the run can finish with partial data. The types here cover
//! the failures that do terminate a pipeline.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for report assembly and rendering.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A markdown section file could not be read.
    #[error("Failed to read report section {path}: {source}")]
    SectionRead {
        /// Path of the missing or unreadable section file
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The headless browser could not be driven to a paginated document.
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// The rendered document could not be written to disk.
    #[error("Failed to write PDF output: {0}")]
    Output(#[from] std::io::Error),
}
