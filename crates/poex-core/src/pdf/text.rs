//! Plain-text documents with form-feed page breaks.

use std::fs;
use std::path::Path;

use super::{limit_pages, split_pages, PageSource, Result};
use crate::error::PdfError;

/// Text already extracted from a document, one entry per page.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    pages: Vec<String>,
    max_pages: usize,
}

impl TextDocument {
    /// Create a document from page texts.
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages, max_pages: 0 }
    }

    /// Split `text` into pages on form feeds.
    pub fn from_text(text: &str) -> Self {
        Self::new(split_pages(text))
    }

    /// Read a text export from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|_| PdfError::NotFound(path.to_path_buf()))?;
        Ok(Self::from_text(&text))
    }

    /// Limit the number of pages returned (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl PageSource for TextDocument {
    fn page_count(&self) -> usize {
        limit_pages(self.pages.len(), self.max_pages)
    }

    fn page_texts(&self) -> Vec<String> {
        self.pages[..self.page_count()].to_vec()
    }
}
