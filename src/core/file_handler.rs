use super::error::{CoreError, PdfError};
use super::pdf::{LopdfEngine, PdfEngine};
use super::FileHandle;
use crate::utils::file_detection::{classify, FileKind};
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies the raw bytes behind a `FileHandle`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn read(&self, file: &FileHandle) -> std::io::Result<Vec<u8>>;
}

/// Reads handles from the local filesystem via their `location`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSource;

#[async_trait]
impl ContentSource for DiskSource {
    async fn read(&self, file: &FileHandle) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&file.location).await
    }
}

/// Turns selected files into searchable text.
///
/// Nothing is cached: every call reads and decodes the file again.
pub struct FileHandler {
    source: Arc<dyn ContentSource>,
    pdf_engine: Arc<dyn PdfEngine>,
}

impl FileHandler {
    pub fn new(source: Arc<dyn ContentSource>, pdf_engine: Arc<dyn PdfEngine>) -> Self {
        Self { source, pdf_engine }
    }

    /// Disk-backed reads with the `lopdf` engine.
    pub fn from_disk() -> Self {
        Self::new(Arc::new(DiskSource), Arc::new(LopdfEngine))
    }

    pub async fn extract_text(&self, file: &FileHandle) -> Result<String, CoreError> {
        let kind = classify(file)
            .map(|c| c.kind())
            .ok_or_else(|| CoreError::Unsupported(file.display_path().to_string()))?;

        let bytes = self
            .source
            .read(file)
            .await
            .map_err(|e| CoreError::Read(e, file.display_path().to_string()))?;

        match kind {
            FileKind::Text => Ok(decode_text(&bytes)),
            FileKind::Pdf => {
                self.extract_pdf_text(bytes)
                    .await
                    .map_err(|source| CoreError::Extraction {
                        name: file.display_path().to_string(),
                        source,
                    })
            }
        }
    }

    /// Concatenates every page in reading order. Each page contributes its
    /// fragments joined by single spaces, followed by one trailing space.
    /// Any failure discards the pages gathered so far.
    async fn extract_pdf_text(&self, bytes: Vec<u8>) -> Result<String, PdfError> {
        let document = self.pdf_engine.open_document(bytes).await?;
        let mut full_text = String::new();

        for number in 1..=document.page_count() {
            let page = document.get_page(number).await?;
            let fragments = page.text_content().await?;
            let page_text = fragments
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            full_text.push_str(&page_text);
            full_text.push(' ');
        }

        Ok(full_text)
    }
}

/// Decodes file bytes as text. `Encoding::decode` sniffs a BOM, so a UTF-8 or
/// UTF-16 BOM selects that encoding; anything else is treated as UTF-8 with
/// malformed sequences replaced. `decode_without_bom_handling` would lose the
/// UTF-16 case.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _, _) = encoding_rs::UTF_8.decode(bytes);
    text.into_owned()
}
