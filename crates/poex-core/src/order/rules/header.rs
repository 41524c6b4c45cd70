//! Header field extraction (PO number and order date).

use regex::Regex;
use tracing::debug;

use super::cleanup::strip_currency_noise;
use super::dates::OrderDateExtractor;
use super::patterns::{DREAMPRICE_DATE, DREAMPRICE_PO, WINNERS_DATE, WINNERS_PO};
use super::FieldExtractor;
use crate::models::order::DocumentHeader;

/// Extracts the token following a label pattern.
pub struct LabeledTokenExtractor {
    label: &'static Regex,
}

impl LabeledTokenExtractor {
    pub fn new(label: &'static Regex) -> Self {
        Self { label }
    }
}

impl FieldExtractor for LabeledTokenExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.label
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.label
            .captures_iter(text)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }
}

/// Label patterns and text cleanup for one supplier's header.
pub struct HeaderRules {
    po_number: LabeledTokenExtractor,
    order_date: OrderDateExtractor,
    strip_noise: bool,
}

impl HeaderRules {
    /// English labels: "PURCHASE ORDER", "ORDER DATE" / "DATE".
    pub fn dreamprice() -> Self {
        Self {
            po_number: LabeledTokenExtractor::new(&DREAMPRICE_PO),
            order_date: OrderDateExtractor::new(&DREAMPRICE_DATE),
            strip_noise: false,
        }
    }

    /// French labels: "N° commande", "Date de commande"; currency noise removed first.
    pub fn winners() -> Self {
        Self {
            po_number: LabeledTokenExtractor::new(&WINNERS_PO),
            order_date: OrderDateExtractor::new(&WINNERS_DATE),
            strip_noise: true,
        }
    }

    /// Extract header fields from the whole-document text.
    pub fn extract(&self, text: &str) -> DocumentHeader {
        let text = if self.strip_noise {
            strip_currency_noise(text)
        } else {
            text.into()
        };

        let po_numbers = self.po_number.extract_all(&text);
        if po_numbers.windows(2).any(|pair| pair[0] != pair[1]) {
            debug!("Conflicting PO numbers {:?}, keeping the first", po_numbers);
        }

        let header = DocumentHeader {
            po_number: po_numbers.into_iter().next(),
            order_date: self.order_date.extract(&text),
        };

        debug!(
            "Header: po_number={:?}, order_date={:?}",
            header.po_number, header.order_date
        );
        header
    }
}
