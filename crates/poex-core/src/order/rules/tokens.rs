//! Left-to-right tokenizer splitting a line into text and numeric segments.

use super::patterns::NUMBER_TOKEN;

/// Kind of a line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Text,
    Number,
}

/// A contiguous slice of the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            kind: TokenKind::Text,
            text,
        }
    }

    fn number(text: &'a str) -> Self {
        Self {
            kind: TokenKind::Number,
            text,
        }
    }

    pub fn is_number(&self) -> bool {
        self.kind == TokenKind::Number
    }
}

/// Split `line` into alternating text and number segments.
///
/// Concatenating the token texts gives back the input unchanged.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in NUMBER_TOKEN.find_iter(line) {
        if m.start() > last {
            tokens.push(Token::text(&line[last..m.start()]));
        }
        tokens.push(Token::number(m.as_str()));
        last = m.end();
    }

    if last < line.len() {
        tokens.push(Token::text(&line[last..]));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_segments() {
        let tokens = tokenize("Cola 330ml 6 1,20 7.20");
        let numbers: Vec<&str> = tokens
            .iter()
            .filter(|t| t.is_number())
            .map(|t| t.text)
            .collect();
        assert_eq!(numbers, vec!["330", "6", "1,20", "7.20"]);
        assert_eq!(tokens[0], Token::text("Cola "));
        assert_eq!(tokens[2], Token::text("ml "));
    }

    #[test]
    fn test_tokenize_is_lossless() {
        let line = "Widget 2 10.00 7182 00 end";
        let joined: String = tokenize(line).iter().map(|t| t.text).collect();
        assert_eq!(joined, line);
    }

    #[test]
    fn test_tokenize_text_only() {
        assert_eq!(tokenize("no digits"), vec![Token::text("no digits")]);
        assert!(tokenize("").is_empty());
    }
}
