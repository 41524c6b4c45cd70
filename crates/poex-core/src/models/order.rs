//! Purchase-order payload models.
//!
//! Field names on the wire follow the downstream consumer's column keys
//! (`PONumber`, `Barcode`, `UnitPrice`, ...), so most structs rename their
//! fields for serialization.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Supplier layouts understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Supplier {
    /// Single-line rows with trailing numeric columns.
    Dreamprice,
    /// Wrapped descriptions with unit-marker anchored quantities.
    Winners,
}

impl Supplier {
    /// All known suppliers.
    pub const ALL: [Supplier; 2] = [Supplier::Dreamprice, Supplier::Winners];

    /// Identifier used in payloads and artifact names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Supplier::Dreamprice => "dreamprice",
            Supplier::Winners => "winners",
        }
    }
}

impl Default for Supplier {
    fn default() -> Self {
        Self::Dreamprice
    }
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Supplier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dreamprice" => Ok(Supplier::Dreamprice),
            "winners" => Ok(Supplier::Winners),
            other => Err(format!("unknown supplier: {}", other)),
        }
    }
}

/// Header fields found on the document.
///
/// Absent fields are normal and are omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHeader {
    /// Purchase-order number.
    #[serde(rename = "PONumber", skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,

    /// Order date, serialized as `YYYY-MM-DD`.
    #[serde(rename = "OrderDate", skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,
}

impl DocumentHeader {
    /// Check if no header field was found.
    pub fn is_empty(&self) -> bool {
        self.po_number.is_none() && self.order_date.is_none()
    }
}

/// Row produced by the right-anchored parser, numbered across the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SequencedRow {
    #[serde(rename = "id")]
    pub id: u32,
    pub barcode: String,
    pub description: String,
    pub qty: String,
    pub unit_price: String,
    pub total: String,
}

/// Row produced by the anchored parser, tagged with its source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArticleRow {
    /// Supplier article code; empty when the line carried none.
    pub article: String,
    pub barcode: String,
    pub description: String,
    pub qty: String,
    /// Unit price with two decimals.
    pub unit_price: String,
    /// Computed line total with two decimals.
    pub total: String,
    /// 1-based page number.
    #[serde(rename = "page")]
    pub page: u32,
}

/// A line item in either supplier's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowRecord {
    Sequenced(SequencedRow),
    Article(ArticleRow),
}

impl RowRecord {
    pub fn description(&self) -> &str {
        match self {
            RowRecord::Sequenced(row) => &row.description,
            RowRecord::Article(row) => &row.description,
        }
    }
}

impl From<SequencedRow> for RowRecord {
    fn from(row: SequencedRow) -> Self {
        RowRecord::Sequenced(row)
    }
}

impl From<ArticleRow> for RowRecord {
    fn from(row: ArticleRow) -> Self {
        RowRecord::Article(row)
    }
}

/// Horizontal alignment of a presentation column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

/// Static presentation metadata for one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub label: String,
    pub field: String,
    pub align: Align,
}

impl ColumnDescriptor {
    pub fn new(name: &str, label: &str, field: &str, align: Align) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field: field.to_string(),
            align,
        }
    }
}

/// The single result of one extraction invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionPayload {
    /// Whether parsing completed without an unhandled failure.
    pub success: bool,

    /// Supplier layout used for parsing.
    pub supplier: Supplier,

    /// Header fields found on the document.
    pub header: DocumentHeader,

    /// Rows in document reading order.
    pub rows: Vec<RowRecord>,

    /// Presentation columns for the supplier.
    pub columns: Vec<ColumnDescriptor>,

    /// Failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Diagnostic trace accompanying a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

impl ExtractionPayload {
    /// Build a successful payload.
    pub fn success(
        supplier: Supplier,
        header: DocumentHeader,
        rows: Vec<RowRecord>,
        columns: Vec<ColumnDescriptor>,
    ) -> Self {
        Self {
            success: true,
            supplier,
            header,
            rows,
            columns,
            error: None,
            traceback: None,
        }
    }

    /// Build a failure payload with an empty header and no rows.
    pub fn failure(
        supplier: Supplier,
        columns: Vec<ColumnDescriptor>,
        error: impl Into<String>,
        traceback: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            supplier,
            header: DocumentHeader::default(),
            rows: Vec::new(),
            columns,
            error: Some(error.into()),
            traceback: Some(traceback.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_header_omits_missing_fields() {
        let header = DocumentHeader {
            po_number: Some("PO123".to_string()),
            order_date: None,
        };
        assert_eq!(serde_json::to_value(&header).unwrap(), json!({"PONumber": "PO123"}));

        let header = DocumentHeader {
            po_number: None,
            order_date: NaiveDate::from_ymd_opt(2024, 3, 5),
        };
        assert_eq!(
            serde_json::to_value(&header).unwrap(),
            json!({"OrderDate": "2024-03-05"})
        );
        assert_eq!(serde_json::to_value(DocumentHeader::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_row_field_names() {
        let row = RowRecord::from(SequencedRow {
            id: 1,
            barcode: "1234567".to_string(),
            description: "Widget Foo".to_string(),
            qty: "10".to_string(),
            unit_price: "2.50".to_string(),
            total: "25.00".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "id": 1,
                "Barcode": "1234567",
                "Description": "Widget Foo",
                "Qty": "10",
                "UnitPrice": "2.50",
                "Total": "25.00"
            })
        );

        let row = RowRecord::from(ArticleRow {
            article: "123456".to_string(),
            barcode: "3760123456789".to_string(),
            description: "Savon".to_string(),
            qty: "6".to_string(),
            unit_price: "120.50".to_string(),
            total: "723.00".to_string(),
            page: 2,
        });
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["Article"], "123456");
        assert_eq!(value["page"], 2);
        assert_eq!(serde_json::from_value::<RowRecord>(value).unwrap(), row);
    }

    #[test]
    fn test_failure_payload_shape() {
        let payload = ExtractionPayload::failure(Supplier::Winners, Vec::new(), "boom", "trace");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["supplier"], "winners");
        assert_eq!(value["header"], json!({}));
        assert_eq!(value["rows"], json!([]));
        assert_eq!(value["error"], "boom");
        assert_eq!(value["traceback"], "trace");
    }

    #[test]
    fn test_supplier_from_str() {
        assert_eq!("Winners".parse::<Supplier>(), Ok(Supplier::Winners));
        assert_eq!(" dreamprice ".parse::<Supplier>(), Ok(Supplier::Dreamprice));
        assert!("acme".parse::<Supplier>().is_err());
    }
}
