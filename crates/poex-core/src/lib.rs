//! Core library for supplier purchase-order extraction.
//!
//! This crate provides:
//! - Page text extraction (PDF via lopdf/pdf-extract, form-feed separated text)
//! - Header parsing (PO number, order date) per supplier layout
//! - Line-item row parsers for right-anchored and anchored/buffered layouts
//! - Payload assembly with a uniform success/failure envelope
//! - Result sinks that keep the payload apart from diagnostics

pub mod error;
pub mod models;
pub mod order;
pub mod output;
pub mod pdf;

pub use error::{ExtractionError, PdfError, PoexError, Result};
pub use models::config::PoexConfig;
pub use models::order::{
    Align, ArticleRow, ColumnDescriptor, DocumentHeader, ExtractionPayload, RowRecord,
    SequencedRow,
};
pub use order::{Completion, OrderExtraction, Outcome, Supplier, SupplierExtractor};
pub use output::{ArtifactWriter, ResultSink, WriterSink};
pub use pdf::{load_pages, PageSource, PdfExtractor, TextDocument};
