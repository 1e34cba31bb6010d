//! The PDF engine seam and its `lopdf` implementation.
//!
//! The search pipeline only needs "open document, count pages, fetch one page,
//! list its text fragments". Anything that can answer those four questions can
//! stand in for the engine, which keeps parsing details out of the extractor.

use super::error::PdfError;
use async_trait::async_trait;
use std::sync::Arc;

/// One piece of text content as the engine reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    pub text: String,
}

impl TextFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
pub trait PdfEngine: Send + Sync {
    /// Parses a document. Fails on corrupt or encrypted input.
    async fn open_document(&self, bytes: Vec<u8>) -> Result<Box<dyn PdfDocument>, PdfError>;
}

#[async_trait]
pub trait PdfDocument: Send + Sync {
    fn page_count(&self) -> u32;

    /// Fetches a page by its 1-based number.
    async fn get_page(&self, number: u32) -> Result<Box<dyn PdfPage>, PdfError>;
}

#[async_trait]
pub trait PdfPage: Send + Sync {
    async fn text_content(&self) -> Result<Vec<TextFragment>, PdfError>;
}

/// Pure-Rust engine backed by `lopdf`. Parsing runs on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

#[async_trait]
impl PdfEngine for LopdfEngine {
    async fn open_document(&self, bytes: Vec<u8>) -> Result<Box<dyn PdfDocument>, PdfError> {
        let document =
            tokio::task::spawn_blocking(move || lopdf::Document::load_mem(&bytes)).await??;

        reject_encrypted(&document)?;

        // BTreeMap keys come back in ascending page order.
        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        Ok(Box::new(LopdfDocument {
            inner: Arc::new(document),
            pages,
        }))
    }
}

fn reject_encrypted(document: &lopdf::Document) -> Result<(), PdfError> {
    if document.is_encrypted() {
        return Err(PdfError::Encrypted);
    }
    Ok(())
}

struct LopdfDocument {
    inner: Arc<lopdf::Document>,
    pages: Vec<u32>,
}

#[async_trait]
impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn get_page(&self, number: u32) -> Result<Box<dyn PdfPage>, PdfError> {
        let index = number
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|i| *i < self.pages.len())
            .ok_or(PdfError::PageOutOfRange(number, self.page_count()))?;

        Ok(Box::new(LopdfPage {
            document: Arc::clone(&self.inner),
            page_number: self.pages[index],
        }))
    }
}

struct LopdfPage {
    document: Arc<lopdf::Document>,
    page_number: u32,
}

#[async_trait]
impl PdfPage for LopdfPage {
    async fn text_content(&self) -> Result<Vec<TextFragment>, PdfError> {
        let document = Arc::clone(&self.document);
        let page_number = self.page_number;
        let text =
            tokio::task::spawn_blocking(move || document.extract_text(&[page_number])).await??;

        // lopdf ends each text run with a newline; treat runs as fragments.
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(TextFragment::new)
            .collect())
    }
}
