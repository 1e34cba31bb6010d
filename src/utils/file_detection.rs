//! Decides which selected files can be searched, and how.
//!
//! Browsers and file pickers report MIME types inconsistently across
//! platforms, so the declared type and the file name are two independent
//! chances to recognise a file. The declared type is consulted first; the
//! extension only decides when the type says nothing useful.

use crate::core::FileHandle;

pub const PDF_MIME: &str = "application/pdf";

const TEXT_MIME_TYPES: &[&str] = &[
    "text/plain",
    "text/html",
    "text/css",
    "text/javascript",
    "application/json",
    "application/xml",
];

const TEXT_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".markdown", ".csv", ".tsv", ".log", ".json", ".xml", ".html", ".htm",
    ".css", ".js", ".yaml", ".yml", ".toml", ".ini",
];

/// How a searchable file must be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
}

/// Which stage of the decision table recognised the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    KnownType(FileKind),
    ExtensionFallback(FileKind),
}

impl Classification {
    pub fn kind(self) -> FileKind {
        match self {
            Classification::KnownType(kind) | Classification::ExtensionFallback(kind) => kind,
        }
    }
}

/// Classifies a file, or returns `None` when it is not searchable.
pub fn classify(file: &FileHandle) -> Option<Classification> {
    classify_by_type(&file.declared_type)
        .map(Classification::KnownType)
        .or_else(|| classify_by_name(&file.name).map(Classification::ExtensionFallback))
}

pub fn is_searchable(file: &FileHandle) -> bool {
    classify(file).is_some()
}

pub fn is_pdf(file: &FileHandle) -> bool {
    classify(file).map(Classification::kind) == Some(FileKind::Pdf)
}

fn classify_by_type(declared_type: &str) -> Option<FileKind> {
    if declared_type == PDF_MIME {
        Some(FileKind::Pdf)
    } else if TEXT_MIME_TYPES.contains(&declared_type) {
        Some(FileKind::Text)
    } else {
        None
    }
}

fn classify_by_name(name: &str) -> Option<FileKind> {
    let lower = name.to_lowercase();
    if lower.ends_with(".pdf") {
        Some(FileKind::Pdf)
    } else if TEXT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        Some(FileKind::Text)
    } else {
        None
    }
}
