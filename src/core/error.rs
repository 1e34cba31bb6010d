//! Defines the custom error types for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Per-file variants (`Read`, `Extraction`, `Unsupported`) are contained by the
/// search engine and only surface in logs. `InvalidRequest` is the one condition
/// that aborts a search, and it does so before any batch starts.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The raw bytes of a file could not be read.
    #[error("Failed to read {1}: {0}")]
    Read(#[source] std::io::Error, String),

    /// A PDF could not be turned into text.
    #[error("Failed to extract text from {name}: {source}")]
    Extraction {
        name: String,
        #[source]
        source: PdfError,
    },

    /// The file is neither text-like nor a PDF.
    #[error("Unsupported file type for {0}")]
    Unsupported(String),

    /// Represents a path that was expected to be a directory but was not.
    #[error("Path is not a valid directory: {0}")]
    NotADirectory(PathBuf),

    /// The search parameters cannot produce a scan.
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    /// Represents an error that occurred when a Tokio task was joined.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors raised by a PDF engine.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("document is encrypted")]
    Encrypted,

    #[error("page {0} does not exist (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    #[error(transparent)]
    Engine(#[from] lopdf::Error),

    #[error("PDF worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Other(String),
}
