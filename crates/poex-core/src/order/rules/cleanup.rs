//! Text cleanup shared by header and description handling.

use std::borrow::Cow;

use super::patterns::{CURRENCY_NOISE, REPEATED_WHITESPACE};

/// Remove currency-unit tokens that would otherwise be read as data.
pub fn strip_currency_noise(text: &str) -> Cow<'_, str> {
    CURRENCY_NOISE.replace_all(text, "")
}

/// Strip currency noise, collapse runs of whitespace and trim.
pub fn clean_description(text: &str) -> String {
    let stripped = strip_currency_noise(text.trim());
    REPEATED_WHITESPACE
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_description() {
        assert_eq!(clean_description("  Savon   liquide  en MUR "), "Savon liquide");
        assert_eq!(clean_description("Gel douche MUR 250ml"), "Gel douche 250ml");
        assert_eq!(clean_description(""), "");
    }

    #[test]
    fn test_strip_keeps_unrelated_words() {
        assert_eq!(strip_currency_noise("Murier en pot"), "Murier en pot");
    }
}
