//! Per-token spelling correction applied ahead of query interpretation.

use serde::{Deserialize, Serialize};

use crate::spelling::dictionary::Vocabulary;
use crate::spelling::suggest::{SuggestionConfig, SuggestionEngine};

/// Configuration for the spelling corrector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Maximum edit distance for a substitution.
    pub max_distance: usize,
    /// Minimum token length to consider for correction. Very short tokens
    /// are too ambiguous to correct safely.
    pub min_token_length: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            max_distance: 2,
            min_token_length: 3,
        }
    }
}

/// Spelling corrector that rewrites query tokens toward the vocabulary.
///
/// Each whitespace-delimited token is looked up independently; if the
/// suggestion engine produces a candidate within the distance threshold the
/// token is replaced with the top suggestion, otherwise it passes through
/// unchanged. Unknown tokens are never an error.
#[derive(Debug, Clone)]
pub struct SpellingCorrector {
    engine: SuggestionEngine,
    config: CorrectorConfig,
}

impl SpellingCorrector {
    /// Create a corrector over the given vocabulary with default settings.
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_config(vocabulary, CorrectorConfig::default())
    }

    /// Create a corrector with custom configuration.
    pub fn with_config(vocabulary: Vocabulary, config: CorrectorConfig) -> Self {
        let suggestion_config = SuggestionConfig {
            max_distance: config.max_distance,
            max_suggestions: 1,
            ..Default::default()
        };
        let engine = SuggestionEngine::with_config(vocabulary, suggestion_config);

        SpellingCorrector { engine, config }
    }

    /// Correct a single token. Returns `None` when the token should be kept
    /// as-is (known term, too short, numeric, or no close suggestion).
    pub fn correct_token(&self, token: &str) -> Option<String> {
        if token.chars().count() < self.config.min_token_length {
            return None;
        }
        if !token.chars().all(|c| c.is_alphabetic() || c == '-') {
            return None;
        }
        if self.engine.vocabulary().contains(token) {
            return None;
        }

        self.engine.best(token).map(|s| s.word)
    }

    /// Correct every token of an already-normalized query string.
    pub fn correct_query(&self, query: &str) -> String {
        query
            .split_whitespace()
            .map(|token| {
                self.correct_token(token)
                    .unwrap_or_else(|| token.to_string())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> SpellingCorrector {
        let vocabulary = Vocabulary::from_terms([
            "nike", "adidas", "samsung", "shoes", "fleece", "wireless", "cheap", "under",
        ]);
        SpellingCorrector::new(vocabulary)
    }

    #[test]
    fn test_known_tokens_unchanged() {
        assert_eq!(corrector().correct_query("cheap nike shoes"), "cheap nike shoes");
    }

    #[test]
    fn test_misspelled_token_replaced() {
        assert_eq!(corrector().correct_query("nkie shoes"), "nike shoes");
        assert_eq!(corrector().correct_query("flece jacket"), "fleece jacket");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        // "jacket" is not in the vocabulary and nothing is close to it.
        assert_eq!(corrector().correct_query("red jacket"), "red jacket");
    }

    #[test]
    fn test_numbers_and_short_tokens_skipped() {
        assert_eq!(corrector().correct_query("shoes under 500"), "shoes under 500");
        assert_eq!(corrector().correct_query("tv"), "tv");
    }
}
