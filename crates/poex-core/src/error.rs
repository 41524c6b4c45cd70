//! Error types for the poex-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the poex library.
#[derive(Error, Debug)]
pub enum PoexError {
    /// Document loading or text extraction error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Header or row extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload or configuration serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to opening documents and reading their page text.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The input path does not exist or cannot be read.
    #[error("input not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to open/parse the document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Faults raised while turning page text into rows.
///
/// A line that does not match is not an error; these cover values that
/// matched a pattern but could not be represented.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A matched token could not be parsed as a number.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },

    /// An arithmetic result does not fit the decimal range.
    #[error("arithmetic overflow computing {0}")]
    Overflow(String),

    /// Parser state is inconsistent with the line being processed.
    #[error("invalid parser state: {0}")]
    InvalidState(String),
}

impl PoexError {
    /// Whether this error means the input document could not be found.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, PoexError::Pdf(PdfError::NotFound(_)))
    }
}

/// Result type for the poex library.
pub type Result<T> = std::result::Result<T, PoexError>;
