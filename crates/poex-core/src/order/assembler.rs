//! Combines header, rows and column schema into the extraction payload.
//!
//! This is the only place failures are turned into output: whatever goes
//! wrong while parsing, exactly one well-formed payload comes out.

use std::any::Any;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{error, info};

use super::{Result, Supplier, SupplierExtractor};
use crate::error::PoexError;
use crate::models::config::PdfConfig;
use crate::models::order::ExtractionPayload;
use crate::pdf::load_pages;

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Success,
    /// Parsing failed after the document was read.
    Failed,
    /// The input document could not be found or read.
    InputNotFound,
}

/// Payload plus completion status of one invocation.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub payload: ExtractionPayload,
    pub completion: Completion,
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self.completion {
            Completion::Success => 0,
            Completion::InputNotFound => 1,
            Completion::Failed => self.payload.supplier.failure_exit_code(),
        }
    }
}

/// Run the header parser and the supplier's row parser over page texts.
pub fn assemble(extractor: &dyn SupplierExtractor, pages: &[String]) -> Result<ExtractionPayload> {
    let full_text = pages.join("\n");
    let header = extractor.extract_header(&full_text);
    let rows = extractor.extract_rows(pages)?;

    Ok(ExtractionPayload::success(
        extractor.supplier(),
        header,
        rows,
        extractor.columns(),
    ))
}

/// One-document extraction for a supplier layout.
pub struct OrderExtraction {
    supplier: Supplier,
    pdf: PdfConfig,
}

impl OrderExtraction {
    pub fn new(supplier: Supplier) -> Self {
        Self {
            supplier,
            pdf: PdfConfig::default(),
        }
    }

    /// Set document reading options.
    pub fn with_pdf_config(mut self, pdf: PdfConfig) -> Self {
        self.pdf = pdf;
        self
    }

    /// Read the document at `path` and extract it.
    pub fn run(&self, path: &Path) -> Outcome {
        info!("Processing {} as {}", path.display(), self.supplier);

        match load_pages(path, &self.pdf) {
            Ok(pages) => self.run_pages(&pages),
            Err(e) => {
                let e = PoexError::from(e);
                error!("Failed to read {}: {}", path.display(), e);
                let completion = if e.is_input_not_found() {
                    Completion::InputNotFound
                } else {
                    Completion::Failed
                };
                self.failed(&e, completion)
            }
        }
    }

    /// Extract already-loaded page texts.
    pub fn run_pages(&self, pages: &[String]) -> Outcome {
        let extractor = self.supplier.extractor();
        let result = panic::catch_unwind(AssertUnwindSafe(|| assemble(extractor.as_ref(), pages)));

        match result {
            Ok(Ok(payload)) => {
                info!(
                    "Extracted {} rows (PO {:?})",
                    payload.rows.len(),
                    payload.header.po_number
                );
                Outcome {
                    payload,
                    completion: Completion::Success,
                }
            }
            Ok(Err(e)) => {
                error!("Extraction failed: {}", e);
                self.failed(&PoexError::from(e), Completion::Failed)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Extraction panicked: {}", message);
                Outcome {
                    payload: ExtractionPayload::failure(
                        self.supplier,
                        extractor.columns(),
                        message.clone(),
                        format!("panic during extraction: {}", message),
                    ),
                    completion: Completion::Failed,
                }
            }
        }
    }

    fn failed(&self, e: &PoexError, completion: Completion) -> Outcome {
        Outcome {
            payload: ExtractionPayload::failure(
                self.supplier,
                self.supplier.extractor().columns(),
                e.to_string(),
                error_trace(e),
            ),
            completion,
        }
    }
}

/// Debug form of the error followed by its source chain.
fn error_trace(e: &(dyn Error + 'static)) -> String {
    let mut lines = vec![format!("{:?}", e)];
    let mut source = e.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {}", cause));
        source = cause.source();
    }
    lines.join("\n")
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
