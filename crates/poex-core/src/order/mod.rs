//! Purchase-order extraction: header rules, supplier row parsers, and
//! payload assembly.

mod assembler;
pub mod dreamprice;
pub mod rules;
pub mod winners;

pub use assembler::{assemble, Completion, OrderExtraction, Outcome};
pub use dreamprice::DreampriceExtractor;
pub use winners::{AnchoredRowParser, ScanState, WinnersExtractor};

pub use crate::models::order::Supplier;

use crate::error::ExtractionError;
use crate::models::order::{ColumnDescriptor, DocumentHeader, RowRecord};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Capabilities every supplier layout provides.
pub trait SupplierExtractor {
    /// The supplier this extractor handles.
    fn supplier(&self) -> Supplier;

    /// Extract header fields from the whole-document text.
    fn extract_header(&self, text: &str) -> DocumentHeader;

    /// Extract rows from ordered page texts.
    fn extract_rows(&self, pages: &[String]) -> Result<Vec<RowRecord>>;

    /// Static presentation columns.
    fn columns(&self) -> Vec<ColumnDescriptor>;
}

impl Supplier {
    /// Create a fresh extractor for this supplier.
    pub fn extractor(&self) -> Box<dyn SupplierExtractor> {
        match self {
            Supplier::Dreamprice => Box::new(DreampriceExtractor::new()),
            Supplier::Winners => Box::new(WinnersExtractor::new()),
        }
    }

    /// Process exit code when parsing fails after the document was read.
    ///
    /// Winners reports failures only inside the payload.
    pub fn failure_exit_code(&self) -> i32 {
        match self {
            Supplier::Dreamprice => 1,
            Supplier::Winners => 0,
        }
    }
}
