//! Page text extraction.
//!
//! Parsers only ever see ordered per-page text. A page whose text cannot
//! be read contributes an empty string; only a missing or unparseable
//! document is fatal.

mod extractor;
mod text;

pub use extractor::PdfExtractor;
pub use text::TextDocument;

use std::path::Path;

use tracing::debug;

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Page separator used by plain-text exports.
pub const PAGE_BREAK: char = '\u{000c}';

/// Trait for sources of ordered page text.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Text of every page in reading order.
    ///
    /// Pages that fail to extract are returned as empty strings.
    fn page_texts(&self) -> Vec<String>;
}

/// Open the document at `path` with the reader matching its extension.
///
/// `.txt` files are read as form-feed separated pages; everything else is
/// treated as a PDF.
pub fn open_document(path: &Path, config: &PdfConfig) -> Result<Box<dyn PageSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let source: Box<dyn PageSource> = match extension.as_str() {
        "txt" | "text" => Box::new(TextDocument::open(path)?.with_max_pages(config.max_pages)),
        _ => Box::new(PdfExtractor::open(path)?.with_max_pages(config.max_pages)),
    };

    debug!("Opened {} with {} pages", path.display(), source.page_count());
    Ok(source)
}

/// Read all page texts of the document at `path`.
///
/// The document handle is dropped before this returns, on success and
/// failure alike.
pub fn load_pages(path: &Path, config: &PdfConfig) -> Result<Vec<String>> {
    let source = open_document(path, config)?;
    Ok(source.page_texts())
}

/// Split text into pages on form feeds.
pub(crate) fn split_pages(text: &str) -> Vec<String> {
    text.split(PAGE_BREAK).map(str::to_string).collect()
}

/// Limit a page count to `max_pages` (0 = unlimited).
pub(crate) fn limit_pages(count: usize, max_pages: usize) -> usize {
    if max_pages == 0 {
        count
    } else {
        count.min(max_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_input_is_not_found() {
        let result = load_pages(Path::new("/nonexistent/order.pdf"), &PdfConfig::default());
        assert!(matches!(result, Err(PdfError::NotFound(_))));

        let result = load_pages(Path::new("/nonexistent/order.txt"), &PdfConfig::default());
        assert!(matches!(result, Err(PdfError::NotFound(_))));
    }

    #[test]
    fn test_load_text_pages() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "page one\u{000c}page two\u{000c}page three").unwrap();

        let config = PdfConfig { max_pages: 2 };
        let pages = load_pages(file.path(), &config).unwrap();
        assert_eq!(pages, vec!["page one", "page two"]);
    }

    #[test]
    fn test_limit_pages() {
        assert_eq!(limit_pages(5, 0), 5);
        assert_eq!(limit_pages(5, 2), 2);
        assert_eq!(limit_pages(1, 3), 1);
    }
}
