pub mod cancellation;
pub mod error;
pub mod file_handler;
pub mod ignore;
pub mod ordering;
pub mod pdf;
pub mod scanner;
pub mod search;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// A single file picked by the user, plus the metadata reported for it.
///
/// `declared_type` mirrors what a file picker would report and may be empty
/// or wrong; eligibility never relies on it alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    pub relative_path: String,
    pub declared_type: String,
    pub byte_length: u64,
    /// Where the bytes live. Opaque to everything except the content source.
    pub location: PathBuf,
}

impl FileHandle {
    pub fn new(
        name: impl Into<String>,
        relative_path: impl Into<String>,
        declared_type: impl Into<String>,
        byte_length: u64,
        location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            declared_type: declared_type.into(),
            byte_length,
            location: location.into(),
        }
    }

    /// The most descriptive label for log output.
    pub fn display_path(&self) -> &str {
        if self.relative_path.is_empty() {
            &self.name
        } else {
            &self.relative_path
        }
    }
}

/// Why a search produced nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyReason {
    NoDirectory,
    NoKeyword,
    NoMatches,
}

/// One search invocation's input. The keyword is stored normalized.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub keyword: String,
    pub files: Arc<Vec<FileHandle>>,
}

impl SearchRequest {
    pub fn new(keyword: &str, files: Arc<Vec<FileHandle>>) -> Self {
        Self {
            keyword: normalize_keyword(keyword),
            files,
        }
    }

    /// Returns the empty state to report instead of scanning, if any.
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if self.files.is_empty() {
            Some(EmptyReason::NoDirectory)
        } else if self.keyword.is_empty() {
            Some(EmptyReason::NoKeyword)
        } else {
            None
        }
    }
}

/// Trims and lowercases user input.
pub fn normalize_keyword(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Progress reported after each completed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanProgress {
    pub token: u64,
    pub batch: usize,
    pub total_batches: usize,
    pub files_processed: usize,
    pub matches: usize,
}

/// Final state of one `SearchEngine::run_search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing was scanned.
    Empty(EmptyReason),
    /// The scan finished while still current; matches are sorted by name.
    Completed(Vec<FileHandle>),
    /// A newer search took over. Partial results were dropped.
    Superseded,
}

pub use cancellation::{SearchGeneration, SearchToken};
pub use error::{CoreError, PdfError};
pub use file_handler::{ContentSource, DiskSource, FileHandler};
pub use self::ignore::build_globset_from_patterns;
pub use pdf::{LopdfEngine, PdfDocument, PdfEngine, PdfPage, TextFragment};
pub use scanner::{DirectoryScanner, DirectorySelection};
pub use search::{SearchEngine, YieldStrategy};
