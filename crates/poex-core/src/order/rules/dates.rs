//! Order date extraction and normalization.

use chrono::NaiveDate;
use regex::Regex;

use super::FieldExtractor;

/// Candidate formats, tried in order; the first that parses wins.
///
/// The second element is the year width the format applies to, since
/// chrono's `%Y` would otherwise accept "24" as the year 24. `%y` maps
/// 00-69 to 2000-2069 and 70-99 to 1970-1999.
pub const DATE_FORMATS: [(&str, usize); 6] = [
    ("%d/%m/%Y", 4),
    ("%d-%m-%Y", 4),
    ("%d.%m.%Y", 4),
    ("%d/%m/%y", 2),
    ("%d-%m-%y", 2),
    ("%d.%m.%y", 2),
];

/// Parse a day/month/year token into a date.
///
/// Returns `None` when no candidate format accepts the token.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let year_width = raw.chars().rev().take_while(|c| c.is_ascii_digit()).count();

    DATE_FORMATS
        .iter()
        .filter(|(_, width)| *width == year_width)
        .find_map(|(format, _)| NaiveDate::parse_from_str(raw, format).ok())
}

/// Extracts the date following a label pattern.
///
/// The pattern's first capture group must hold the raw date token.
pub struct OrderDateExtractor {
    label: &'static Regex,
}

impl OrderDateExtractor {
    pub fn new(label: &'static Regex) -> Self {
        Self { label }
    }
}

impl FieldExtractor for OrderDateExtractor {
    type Output = NaiveDate;

    /// Only the first labeled occurrence is considered; if its token does
    /// not parse there is no date.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = self.label.captures(text)?;
        normalize_date(&caps[1])
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.label
            .captures_iter(text)
            .filter_map(|caps| normalize_date(&caps[1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::rules::patterns::DREAMPRICE_DATE;

    fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn test_normalize_four_digit_years() {
        assert_eq!(normalize_date("05/03/2024"), ymd(2024, 3, 5));
        assert_eq!(normalize_date("05-03-2024"), ymd(2024, 3, 5));
        assert_eq!(normalize_date("5.3.2024"), ymd(2024, 3, 5));
    }

    #[test]
    fn test_normalize_two_digit_years() {
        assert_eq!(normalize_date("05/03/24"), ymd(2024, 3, 5));
        assert_eq!(normalize_date("31.12.99"), ymd(1999, 12, 31));
    }

    #[test]
    fn test_unparseable_dates() {
        assert_eq!(normalize_date("31/02/2024"), None);
        assert_eq!(normalize_date("05/13/2024"), None);
        assert_eq!(normalize_date("05/03-2024"), None);
        assert_eq!(normalize_date("05/03/202"), None);
    }

    #[test]
    fn test_first_label_only() {
        let extractor = OrderDateExtractor::new(&DREAMPRICE_DATE);
        let text = "ORDER DATE: 31/02/2024\nDELIVERY DATE: 07/03/2024";
        assert_eq!(extractor.extract(text), None);
        assert_eq!(extractor.extract_all(text), vec![NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()]);
    }
}
