//! Rule-based field extractors for supplier purchase orders.

pub mod cleanup;
pub mod dates;
pub mod header;
pub mod patterns;
pub mod tokens;

pub use cleanup::{clean_description, strip_currency_noise};
pub use dates::{normalize_date, OrderDateExtractor, DATE_FORMATS};
pub use header::HeaderRules;
pub use tokens::{tokenize, Token, TokenKind};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
