//! Query normalization and tokenization.

/// Normalize a raw query: trim surrounding whitespace and lowercase.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A single query token with its position in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text, with edge punctuation stripped.
    pub text: String,
    /// Zero-based position within the query.
    pub position: usize,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Whether the token is entirely numeric.
    pub fn is_numeric(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c.is_ascii_digit())
    }
}

/// A tokenizer that splits normalized text on whitespace.
///
/// Edge punctuation is stripped from each token so that "shoes," and
/// "shoes" analyze identically, but interior hyphens are kept: feature
/// terms like "fast-charging" stay whole. Currency-prefixed amounts keep
/// their digits ("₹500" becomes "500"); price phrases are matched against
/// the raw normalized string anyway.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    /// Tokenize normalized text into a token stream.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .filter_map(|word| {
                let trimmed =
                    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '-');
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .enumerate()
            .map(|(position, text)| Token::new(text, position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Cheap NIKE Shoes  "), "cheap nike shoes");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = WhitespaceTokenizer::new().tokenize("cheap nike shoes");
        assert_eq!(texts(&tokens), vec!["cheap", "nike", "shoes"]);
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_tokenize_strips_edge_punctuation() {
        let tokens = WhitespaceTokenizer::new().tokenize("shoes, \"nike\" (sale)");
        assert_eq!(texts(&tokens), vec!["shoes", "nike", "sale"]);
    }

    #[test]
    fn test_tokenize_keeps_interior_hyphens() {
        let tokens = WhitespaceTokenizer::new().tokenize("fast-charging power bank");
        assert_eq!(texts(&tokens), vec!["fast-charging", "power", "bank"]);
    }

    #[test]
    fn test_tokenize_currency_amounts() {
        let tokens = WhitespaceTokenizer::new().tokenize("under ₹500");
        assert_eq!(texts(&tokens), vec!["under", "500"]);
        assert!(tokens[1].is_numeric());
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(WhitespaceTokenizer::new().tokenize("   ").is_empty());
    }
}
