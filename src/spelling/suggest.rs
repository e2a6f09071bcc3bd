//! Spelling suggestion generation.
//!
//! The suggestion engine scans the vocabulary linearly, which is the right
//! trade-off here: the vocabulary is a few dozen storefront terms, not a
//! natural-language dictionary.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::spelling::dictionary::Vocabulary;
use crate::spelling::levenshtein::{levenshtein_distance_threshold, levenshtein_ratio};

/// A spelling suggestion with a score indicating confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// Confidence score (higher is better, 0.0 to 1.0).
    pub score: f64,
    /// Edit distance from the original word.
    pub distance: usize,
    /// Frequency of the suggested word in the vocabulary.
    pub frequency: u32,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(word: String, score: f64, distance: usize, frequency: u32) -> Self {
        Suggestion {
            word,
            score,
            distance,
            frequency,
        }
    }
}

impl Eq for Suggestion {}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher scores come first
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Configuration for spelling suggestion generation.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// Maximum edit distance to consider.
    pub max_distance: usize,
    /// Maximum number of suggestions to return.
    pub max_suggestions: usize,
    /// Minimum frequency threshold for suggestions.
    pub min_frequency: u32,
    /// Weight for edit-distance similarity in scoring (0.0 to 1.0).
    pub distance_weight: f64,
    /// Weight for word frequency in scoring (0.0 to 1.0).
    pub frequency_weight: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            max_distance: 2,
            max_suggestions: 5,
            min_frequency: 1,
            distance_weight: 0.7,
            frequency_weight: 0.3,
        }
    }
}

/// Spelling suggestion engine over a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    vocabulary: Vocabulary,
    config: SuggestionConfig,
}

impl SuggestionEngine {
    /// Create a new suggestion engine with the given vocabulary.
    pub fn new(vocabulary: Vocabulary) -> Self {
        SuggestionEngine {
            vocabulary,
            config: SuggestionConfig::default(),
        }
    }

    /// Create a new suggestion engine with custom configuration.
    pub fn with_config(vocabulary: Vocabulary, config: SuggestionConfig) -> Self {
        SuggestionEngine { vocabulary, config }
    }

    /// Get the underlying vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Get suggestions for a potentially misspelled word, best first.
    pub fn suggest(&self, word: &str) -> Vec<Suggestion> {
        let word_lower = word.to_lowercase();

        // Already a known term: it is its own top suggestion.
        if self.vocabulary.contains(&word_lower) {
            let frequency = self.vocabulary.frequency(&word_lower);
            return vec![Suggestion::new(word_lower, 1.0, 0, frequency)];
        }

        let mut suggestions: Vec<Suggestion> = self
            .vocabulary
            .words()
            .filter(|(_, frequency)| *frequency >= self.config.min_frequency)
            .filter_map(|(candidate, frequency)| {
                levenshtein_distance_threshold(&word_lower, candidate, self.config.max_distance)
                    .map(|distance| {
                        let score = self.score(&word_lower, candidate);
                        Suggestion::new(candidate.to_string(), score, distance, frequency)
                    })
            })
            .collect();

        suggestions.sort();
        suggestions.truncate(self.config.max_suggestions);
        suggestions
    }

    /// Get the single best suggestion, if any.
    pub fn best(&self, word: &str) -> Option<Suggestion> {
        self.suggest(word).into_iter().next()
    }

    // Frequency is rescaled against the whole vocabulary so a common term
    // can break ties between equally close candidates.
    fn score(&self, word: &str, candidate: &str) -> f64 {
        let similarity = levenshtein_ratio(word, candidate);
        let probability = self.vocabulary.probability(candidate);
        self.config.distance_weight * similarity + self.config.frequency_weight * probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SuggestionEngine {
        let vocabulary =
            Vocabulary::from_terms(["nike", "adidas", "puma", "samsung", "apple", "sony", "shoes"]);
        SuggestionEngine::new(vocabulary)
    }

    #[test]
    fn test_known_word_is_its_own_suggestion() {
        let suggestions = engine().suggest("nike");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].word, "nike");
        assert_eq!(suggestions[0].distance, 0);
        assert!((suggestions[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_close_misspelling_suggested() {
        let suggestions = engine().suggest("nkie");
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0].word, "nike");
        assert!(suggestions[0].distance <= 2);
    }

    #[test]
    fn test_distant_word_has_no_suggestions() {
        let suggestions = engine().suggest("refrigerator");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_suggestions_sorted_best_first() {
        let suggestions = engine().suggest("sonyy");
        for pair in suggestions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_max_suggestions_respected() {
        let vocabulary = Vocabulary::from_terms(["aa", "ab", "ac", "ad", "ae", "af", "ag"]);
        let config = SuggestionConfig {
            max_suggestions: 3,
            ..Default::default()
        };
        let engine = SuggestionEngine::with_config(vocabulary, config);
        assert!(engine.suggest("a").len() <= 3);
    }
}
