//! Common regex patterns for purchase-order extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dreamprice header labels
    pub static ref DREAMPRICE_PO: Regex = Regex::new(
        r"(?i)PURCHASE\s+ORDER[ \t]*[:\-]?[ \t]*([0-9A-Za-z]+)"
    ).unwrap();

    pub static ref DREAMPRICE_DATE: Regex = Regex::new(
        r"(?i)\b(?:ORDER\s+DATE|DATE)[ \t]*[:\-]?[ \t]*(\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})"
    ).unwrap();

    // Winners header labels (French); values sit on the label's line
    pub static ref WINNERS_PO: Regex = Regex::new(
        r"(?i)\bN[°º]?\s*commande[ \t]*[:\-]?[ \t]*([0-9]+)\b"
    ).unwrap();

    pub static ref WINNERS_DATE: Regex = Regex::new(
        r"(?i)Date\s+de\s+commande[ \t]*[:\-]?[ \t]*(\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})"
    ).unwrap();

    // Currency unit noise ("MUR", "en MUR")
    pub static ref CURRENCY_NOISE: Regex = Regex::new(
        r"(?i)\b(?:en\s*)?MUR\b"
    ).unwrap();

    pub static ref REPEATED_WHITESPACE: Regex = Regex::new(r"\s{2,}").unwrap();

    // Right-anchored rows: barcode first, numeric columns last
    pub static ref BARCODE_LINE: Regex = Regex::new(
        r"^(\d{7,14})\s+(.*)$"
    ).unwrap();

    // Integer or decimal with comma or dot separator
    pub static ref NUMBER_TOKEN: Regex = Regex::new(
        r"\d+(?:[.,]\d+)?"
    ).unwrap();

    // Anchored rows: table boundaries
    pub static ref TABLE_HEADER: Regex = Regex::new(
        r"(?i)N[°º]?\s*article.*EAN.*Libell[ée]"
    ).unwrap();

    pub static ref TABLE_FOOTER: Regex = Regex::new(
        r"(?i)^Nb\s+de\s+lignes"
    ).unwrap();

    // Optional article code, EAN barcode, trailing text
    pub static ref ARTICLE_ROW: Regex = Regex::new(
        r"\b(?:(\d{5,7})\s+)?(\d{8,14})\s+(.*)"
    ).unwrap();

    // Unit marker glued to the quantity ("6Ar")
    pub static ref UNIT_GLUED: Regex = Regex::new(
        r"(\d)(Ar)\b"
    ).unwrap();

    pub static ref QTY_BEFORE_UNIT: Regex = Regex::new(
        r"(\d+)\s*Ar\b"
    ).unwrap();

    pub static ref UNIT_PRICE: Regex = Regex::new(
        r"\d+\.\d{2,4}"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_row_without_article_keeps_full_barcode() {
        let caps = ARTICLE_ROW.captures("3760123456789 Savon 6 Ar 1.5000").unwrap();
        assert!(caps.get(1).is_none());
        assert_eq!(&caps[2], "3760123456789");
        assert_eq!(&caps[3], "Savon 6 Ar 1.5000");
    }

    #[test]
    fn test_article_row_with_article() {
        let caps = ARTICLE_ROW.captures("123456 3760123456789 Savon").unwrap();
        assert_eq!(&caps[1], "123456");
        assert_eq!(&caps[2], "3760123456789");
    }

    #[test]
    fn test_table_header_variants() {
        assert!(TABLE_HEADER.is_match("N° article EAN Libellé Qté PU"));
        assert!(TABLE_HEADER.is_match("n°article  ean  libelle"));
        assert!(!TABLE_HEADER.is_match("Libellé EAN N° article"));
    }

    #[test]
    fn test_currency_noise() {
        assert_eq!(CURRENCY_NOISE.replace_all("Prix en MUR 10", ""), "Prix  10");
        assert_eq!(CURRENCY_NOISE.replace_all("MURAL mur", ""), "MURAL ");
    }
}
