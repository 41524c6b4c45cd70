//! Right-anchored row parser for single-line layouts.
//!
//! Every row starts with a barcode and ends with its numeric columns, so
//! fields are identified by counting numbers from the end of the line.

use tracing::{debug, trace};

use super::rules::patterns::BARCODE_LINE;
use super::rules::{tokenize, HeaderRules};
use super::{Result, SupplierExtractor};
use crate::models::order::{
    Align, ColumnDescriptor, DocumentHeader, RowRecord, SequencedRow, Supplier,
};

/// Fields recovered from one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFields {
    pub barcode: String,
    pub description: String,
    pub qty: String,
    pub unit_price: String,
    pub total: String,
}

/// Parse a single trimmed line.
///
/// Returns `None` for lines without a leading barcode or with fewer than
/// three numbers after it (headers, footers, stray text).
pub fn parse_line(line: &str) -> Option<LineFields> {
    let caps = BARCODE_LINE.captures(line)?;
    let barcode = caps.get(1)?.as_str();
    let rest = caps.get(2)?.as_str();

    let tokens = tokenize(rest);
    let numbers: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_number())
        .map(|(i, _)| i)
        .collect();

    let n = numbers.len();
    if n < 3 {
        return None;
    }

    let text = |k: usize| tokens[numbers[k]].text;

    // A short trailing number is the fraction of a total split by a space ("7182 00").
    // The integer half carries no separator of its own.
    let split_total = n >= 4
        && text(n - 1).len() <= 2
        && text(n - 2).bytes().all(|b| b.is_ascii_digit());
    let (qty_index, unit_price, total) = if split_total {
        let total = format!("{}.{}", text(n - 2), text(n - 1));
        (numbers[n - 4], text(n - 3), total)
    } else {
        (numbers[n - 3], text(n - 2), text(n - 1).to_string())
    };

    let description: String = tokens[..qty_index].iter().map(|t| t.text).collect();

    Some(LineFields {
        barcode: barcode.to_string(),
        description: description.trim().to_string(),
        qty: strip_thousands(tokens[qty_index].text),
        unit_price: strip_thousands(unit_price),
        total: strip_thousands(&total),
    })
}

fn strip_thousands(value: &str) -> String {
    value.replace(',', "")
}

/// Extractor for the Dreamprice layout.
pub struct DreampriceExtractor {
    header: HeaderRules,
}

impl DreampriceExtractor {
    pub fn new() -> Self {
        Self {
            header: HeaderRules::dreamprice(),
        }
    }
}

impl Default for DreampriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SupplierExtractor for DreampriceExtractor {
    fn supplier(&self) -> Supplier {
        Supplier::Dreamprice
    }

    fn extract_header(&self, text: &str) -> DocumentHeader {
        self.header.extract(text)
    }

    fn extract_rows(&self, pages: &[String]) -> Result<Vec<RowRecord>> {
        let mut rows = Vec::new();
        let mut next_id = 1u32;

        for (page_index, page) in pages.iter().enumerate() {
            for line in page.lines().map(str::trim).filter(|l| !l.is_empty()) {
                match parse_line(line) {
                    Some(fields) => {
                        rows.push(RowRecord::from(SequencedRow {
                            id: next_id,
                            barcode: fields.barcode,
                            description: fields.description,
                            qty: fields.qty,
                            unit_price: fields.unit_price,
                            total: fields.total,
                        }));
                        next_id += 1;
                    }
                    None => trace!("Page {}: skipped line {:?}", page_index + 1, line),
                }
            }
        }

        debug!("Extracted {} rows from {} pages", rows.len(), pages.len());
        Ok(rows)
    }

    fn columns(&self) -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("Barcode", "Barcode", "Barcode", Align::Left),
            ColumnDescriptor::new("Description", "Description", "Description", Align::Left),
            ColumnDescriptor::new("Qty", "Qty", "Qty", Align::Right),
            ColumnDescriptor::new("UnitPrice", "PU (HT)", "UnitPrice", Align::Right),
            ColumnDescriptor::new("Total", "Total (HT)", "Total", Align::Right),
        ]
    }
}
