//! PDF page text extraction using lopdf and pdf-extract.

use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{limit_pages, split_pages, PageSource, Result};
use crate::error::PdfError;

/// PDF text extractor backed by lopdf.
pub struct PdfExtractor {
    document: Document,
    raw_data: Vec<u8>,
    max_pages: usize,
}

impl PdfExtractor {
    /// Open a PDF file.
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|_| PdfError::NotFound(path.to_path_buf()))?;
        Self::load(&data)
    }

    /// Load a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document for pdf_extract
            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self {
            document,
            raw_data,
            max_pages: 0,
        })
    }

    /// Limit the number of pages read (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Extract text from a single page (1-indexed).
    pub fn extract_page_text(&self, page: u32) -> Result<String> {
        self.document
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Whole-document extraction through pdf-extract, split on form feeds.
    fn extract_with_fallback(&self) -> Result<Vec<String>> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(split_pages(&text))
    }
}

impl PageSource for PdfExtractor {
    fn page_count(&self) -> usize {
        limit_pages(self.document.get_pages().len(), self.max_pages)
    }

    fn page_texts(&self) -> Vec<String> {
        let page_numbers: Vec<u32> = self
            .document
            .get_pages()
            .keys()
            .copied()
            .take(self.page_count())
            .collect();

        let pages: Vec<String> = page_numbers
            .iter()
            .map(|&page| match self.extract_page_text(page) {
                Ok(text) => {
                    trace!("Page {}: {} chars", page, text.len());
                    text
                }
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page, e);
                    String::new()
                }
            })
            .collect();

        if pages.iter().any(|p| !p.trim().is_empty()) {
            return pages;
        }

        // lopdf found no text at all; let pdf-extract try the whole document
        match self.extract_with_fallback() {
            Ok(fallback) if fallback.iter().any(|p| !p.trim().is_empty()) => {
                debug!("Using pdf-extract fallback ({} pages)", fallback.len());
                let keep = limit_pages(fallback.len(), self.max_pages);
                fallback.into_iter().take(keep).collect()
            }
            Ok(_) => pages,
            Err(e) => {
                warn!("Fallback text extraction failed: {}", e);
                pages
            }
        }
    }
}
