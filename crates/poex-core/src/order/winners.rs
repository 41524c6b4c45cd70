//! Anchored row parser for layouts with wrapped descriptions.
//!
//! Long descriptions wrap onto lines printed before the row that carries
//! the barcode, quantity and price. Lines that do not resolve into a row
//! are buffered and prepended to the next row's description.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, trace, warn};

use super::rules::patterns::{
    ARTICLE_ROW, QTY_BEFORE_UNIT, TABLE_FOOTER, TABLE_HEADER, UNIT_GLUED, UNIT_PRICE,
};
use super::rules::{clean_description, HeaderRules};
use super::{Result, SupplierExtractor};
use crate::error::ExtractionError;
use crate::models::order::{
    Align, ArticleRow, ColumnDescriptor, DocumentHeader, RowRecord, Supplier,
};

/// Position of the scanner relative to the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No table header seen yet; lines are ignored.
    BeforeTable,
    /// Inside the table; lines are rows or description fragments.
    InTable,
    /// Footer seen; nothing else is read.
    Done,
}

/// Stateful line scanner for one document.
///
/// State is local to a single document; use a fresh parser per document.
#[derive(Debug)]
pub struct AnchoredRowParser {
    state: ScanState,
    buffer: Vec<String>,
    rows: Vec<ArticleRow>,
}

impl AnchoredRowParser {
    pub fn new() -> Self {
        Self {
            state: ScanState::BeforeTable,
            buffer: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Lines waiting to be attached to the next row.
    pub fn pending(&self) -> &[String] {
        &self.buffer
    }

    pub fn rows(&self) -> &[ArticleRow] {
        &self.rows
    }

    /// Feed every non-empty line of a page (1-indexed).
    pub fn feed_page(&mut self, text: &str, page: u32) -> Result<()> {
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            self.feed_line(line, page)?;
            if self.state == ScanState::Done {
                break;
            }
        }
        Ok(())
    }

    /// Feed one trimmed line.
    pub fn feed_line(&mut self, line: &str, page: u32) -> Result<()> {
        if self.state == ScanState::Done {
            return Ok(());
        }

        // A repeated header (next page) restarts the description buffer
        if TABLE_HEADER.is_match(line) {
            trace!("Page {}: table header", page);
            self.state = ScanState::InTable;
            self.buffer.clear();
            return Ok(());
        }

        if self.state == ScanState::BeforeTable {
            return Ok(());
        }

        if TABLE_FOOTER.is_match(line) {
            debug!("Page {}: table footer, stopping with {} rows", page, self.rows.len());
            self.state = ScanState::Done;
            return Ok(());
        }

        match self.resolve_row(line, page) {
            Ok(Some(row)) => self.rows.push(row),
            Ok(None) => self.buffer.push(line.to_string()),
            Err(e @ (ExtractionError::Parse { .. } | ExtractionError::Overflow(_))) => {
                // The unrepresentable row takes its wrapped description with it
                warn!("Page {}: dropping row {:?}: {}", page, line, e);
                self.buffer.clear();
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Consume the parser, returning rows in reading order.
    pub fn finish(self) -> Vec<ArticleRow> {
        if !self.buffer.is_empty() {
            debug!("Dropping {} unattached lines", self.buffer.len());
        }
        self.rows
    }

    /// Build a row from an anchored line, or `None` when the line must be buffered.
    fn resolve_row(&mut self, line: &str, page: u32) -> Result<Option<ArticleRow>> {
        let Some(caps) = ARTICLE_ROW.captures(line) else {
            return Ok(None);
        };

        let article = caps.get(1).map_or("", |m| m.as_str());
        let barcode = caps
            .get(2)
            .ok_or_else(|| ExtractionError::InvalidState("row anchor without barcode".to_string()))?
            .as_str();
        let tail = caps.get(3).map_or("", |m| m.as_str());
        let tail = UNIT_GLUED.replace_all(tail, "${1} ${2}");

        let Some(qty_caps) = QTY_BEFORE_UNIT.captures(&tail) else {
            trace!("Page {}: anchored line without quantity", page);
            return Ok(None);
        };
        let Some(unit_marker) = qty_caps.get(0) else {
            return Ok(None);
        };

        let Some(price) = UNIT_PRICE.find(&tail[unit_marker.end()..]) else {
            trace!("Page {}: anchored line without unit price", page);
            return Ok(None);
        };

        let qty_text = &qty_caps[1];
        let qty = Decimal::from_str(qty_text).map_err(|_| ExtractionError::Parse {
            field: "Qty".to_string(),
            value: qty_text.to_string(),
        })?;
        let unit_price = Decimal::from_str(price.as_str()).map_err(|_| ExtractionError::Parse {
            field: "UnitPrice".to_string(),
            value: price.as_str().to_string(),
        })?;
        let total = qty
            .checked_mul(unit_price)
            .ok_or_else(|| ExtractionError::Overflow(format!("{} x {}", qty, unit_price)))?
            .round_dp(4);

        let mut parts = std::mem::take(&mut self.buffer);
        parts.push(tail[..unit_marker.start()].to_string());
        let description = clean_description(&parts.join(" "));

        Ok(Some(ArticleRow {
            article: article.to_string(),
            barcode: barcode.to_string(),
            description,
            qty: qty.to_string(),
            unit_price: format_amount(unit_price),
            total: format_amount(total),
            page,
        }))
    }
}

impl Default for AnchoredRowParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Format an amount with two decimals, rounding half away from zero.
///
/// Exact half-cents round up in magnitude (`45.125` becomes `45.13`), unlike
/// binary float formatting which would print `45.12`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Extractor for the Winners layout.
pub struct WinnersExtractor {
    header: HeaderRules,
}

impl WinnersExtractor {
    pub fn new() -> Self {
        Self {
            header: HeaderRules::winners(),
        }
    }
}

impl Default for WinnersExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SupplierExtractor for WinnersExtractor {
    fn supplier(&self) -> Supplier {
        Supplier::Winners
    }

    fn extract_header(&self, text: &str) -> DocumentHeader {
        self.header.extract(text)
    }

    fn extract_rows(&self, pages: &[String]) -> Result<Vec<RowRecord>> {
        let mut parser = AnchoredRowParser::new();

        for (index, page) in pages.iter().enumerate() {
            parser.feed_page(page, (index + 1) as u32)?;
            if parser.state() == ScanState::Done {
                break;
            }
        }

        if parser.state() == ScanState::BeforeTable {
            debug!("No table header found in {} pages", pages.len());
        }

        Ok(parser.finish().into_iter().map(RowRecord::from).collect())
    }

    fn columns(&self) -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("Barcode", "EAN", "Barcode", Align::Left),
            ColumnDescriptor::new("Description", "Description", "Description", Align::Left),
            ColumnDescriptor::new("Qty", "Qté", "Qty", Align::Right),
            ColumnDescriptor::new("UnitPrice", "Prix achat (MUR)", "UnitPrice", Align::Right),
            ColumnDescriptor::new("Total", "Total (HT)", "Total", Align::Right),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "N° article EAN Libellé Qté PU HT";

    fn parse(pages: &[&str]) -> Vec<ArticleRow> {
        let pages: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
        WinnersExtractor::new()
            .extract_rows(&pages)
            .unwrap()
            .into_iter()
            .map(|row| match row {
                RowRecord::Article(row) => row,
                RowRecord::Sequenced(_) => panic!("unexpected row shape"),
            })
            .collect()
    }

    #[test]
    fn test_computed_total() {
        let rows = parse(&[&format!("{HEADER}\n123456 3760123456789 Savon 6 Ar 120.5000 en MUR")]);
        assert_eq!(
            rows,
            vec![ArticleRow {
                article: "123456".to_string(),
                barcode: "3760123456789".to_string(),
                description: "Savon".to_string(),
                qty: "6".to_string(),
                unit_price: "120.50".to_string(),
                total: "723.00".to_string(),
                page: 1,
            }]
        );
    }

    #[test]
    fn test_glued_unit_marker() {
        let rows = parse(&[&format!("{HEADER}\n3760123456789 Gel douche 12Ar 45.125")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].article, "");
        assert_eq!(rows[0].qty, "12");
        assert_eq!(rows[0].unit_price, "45.13");
        assert_eq!(rows[0].total, "541.50");
        assert_eq!(rows[0].description, "Gel douche");
    }

    #[test]
    fn test_continuation_lines_are_prepended() {
        let text = format!(
            "{HEADER}\nSHAMPOOING DOUX\n  extra   long  libelle\n123456 3760123456789 400ML 2 Ar 10.00\n654321 3760000000001 Brosse 1 Ar 5.50"
        );
        let rows = parse(&[&text]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "SHAMPOOING DOUX extra long libelle 400ML");
        assert_eq!(rows[1].description, "Brosse");
    }

    #[test]
    fn test_anchored_line_without_price_is_buffered() {
        let text = format!(
            "{HEADER}\n3760123456789 Carton 6 Ar\n123456 3760000000001 Savon 3 Ar 2.00"
        );
        let rows = parse(&[&text]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].barcode, "3760000000001");
        assert_eq!(rows[0].description, "3760123456789 Carton 6 Ar Savon");
    }

    #[test]
    fn test_anchored_line_without_quantity_is_buffered() {
        let mut parser = AnchoredRowParser::new();
        parser.feed_line(HEADER, 1).unwrap();
        parser.feed_line("3760123456789 Savon sans quantite 2.00", 1).unwrap();
        assert!(parser.rows().is_empty());
        assert_eq!(parser.pending(), ["3760123456789 Savon sans quantite 2.00"]);
    }

    #[test]
    fn test_no_rows_before_header() {
        let text = format!(
            "123456 3760123456789 Savon 6 Ar 1.00\n{HEADER}\n654321 3760000000001 Brosse 1 Ar 5.50"
        );
        let rows = parse(&[&text]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Brosse");
    }

    #[test]
    fn test_no_rows_after_footer() {
        let rows = parse(&[
            &format!("{HEADER}\n654321 3760000000001 Brosse 1 Ar 5.50\nNb de lignes : 1\n123456 3760123456789 Savon 6 Ar 1.00"),
            &format!("{HEADER}\n111111 3760000000002 Peigne 1 Ar 2.00"),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].barcode, "3760000000001");
    }

    #[test]
    fn test_state_transitions() {
        let mut parser = AnchoredRowParser::new();
        assert_eq!(parser.state(), ScanState::BeforeTable);

        parser.feed_line("Bon de commande", 1).unwrap();
        assert_eq!(parser.state(), ScanState::BeforeTable);
        assert!(parser.pending().is_empty());

        parser.feed_line(HEADER, 1).unwrap();
        assert_eq!(parser.state(), ScanState::InTable);

        parser.feed_line("Nb de lignes 0", 1).unwrap();
        assert_eq!(parser.state(), ScanState::Done);

        parser.feed_line(HEADER, 2).unwrap();
        assert_eq!(parser.state(), ScanState::Done);
    }

    #[test]
    fn test_rows_carry_page_numbers() {
        let rows = parse(&[
            &format!("{HEADER}\n654321 3760000000001 Brosse 1 Ar 5.50"),
            "Suite du libelle\n111111 3760000000002 Peigne 4 Ar 2.25",
        ]);
        assert_eq!(rows.iter().map(|r| r.page).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(rows[1].description, "Suite du libelle Peigne");
        assert_eq!(rows[1].total, "9.00");
    }

    #[test]
    fn test_long_quantity_is_kept() {
        let rows = parse(&[&format!(
            "{HEADER}\n3760123456789 Savon 99999999999999999999999 Ar 1.00"
        )]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].qty, "99999999999999999999999");
        assert_eq!(rows[0].total, "99999999999999999999999.00");
    }

    #[test]
    fn test_unrepresentable_total_drops_only_that_row() {
        let rows = parse(&[&format!(
            "{HEADER}\nFRAGMENT\n123456 3760123456789 Savon 7922816251426433759354395033 Ar 100.00\n654321 3760000000001 Brosse 1 Ar 5.50"
        )]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].barcode, "3760000000001");
        assert_eq!(rows[0].description, "Brosse");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from_str("723.0000").unwrap()), "723.00");
        assert_eq!(format_amount(Decimal::from_str("0.125").unwrap()), "0.13");
        assert_eq!(format_amount(Decimal::from(7)), "7.00");
    }
}
