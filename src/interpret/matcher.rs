//! Fuzzy matching of query terms against fixed dictionaries.
//!
//! Feature, brand, and category dictionaries hold at most a few dozen
//! entries each, so matching is a straightforward linear scan with a
//! thresholded edit distance. No trie or BK-tree: at this scale the scan is
//! already faster than anything clever.

use crate::spelling::levenshtein::levenshtein_distance_threshold;

/// Matcher over one fixed dictionary.
#[derive(Debug, Clone)]
pub struct FuzzyTermMatcher {
    entries: Vec<String>,
    max_distance: usize,
}

impl FuzzyTermMatcher {
    /// Create a matcher over the given dictionary entries.
    pub fn new<I, S>(entries: I, max_distance: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FuzzyTermMatcher {
            entries: entries
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
            max_distance,
        }
    }

    /// All dictionary entries matched by any of the terms, deduplicated, in
    /// dictionary order. Used for features, where a query can name several.
    pub fn match_all<S: AsRef<str>>(&self, terms: &[S]) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| {
                terms.iter().any(|term| {
                    levenshtein_distance_threshold(term.as_ref(), entry, self.max_distance)
                        .is_some()
                })
            })
            .cloned()
            .collect()
    }

    /// The single best match across all term/entry pairs: lowest edit
    /// distance wins, with dictionary order as the tiebreak. Used for brand
    /// and category, which admit at most one match.
    pub fn match_best<S: AsRef<str>>(&self, terms: &[S]) -> Option<String> {
        let mut best: Option<(usize, usize)> = None; // (distance, entry index)

        for (index, entry) in self.entries.iter().enumerate() {
            for term in terms {
                if let Some(distance) =
                    levenshtein_distance_threshold(term.as_ref(), entry, self.max_distance)
                {
                    let better = match best {
                        None => true,
                        Some((best_distance, _)) => distance < best_distance,
                    };
                    if better {
                        best = Some((distance, index));
                    }
                }
            }
        }

        best.map(|(_, index)| self.entries[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> FuzzyTermMatcher {
        FuzzyTermMatcher::new(
            ["fleece", "ssd", "weatherproof", "wireless", "bluetooth"],
            2,
        )
    }

    #[test]
    fn test_exact_and_fuzzy_feature_matches() {
        let matches = features().match_all(&["flece", "blutooth", "jacket"]);
        assert_eq!(matches, vec!["fleece", "bluetooth"]);
    }

    #[test]
    fn test_distance_above_threshold_excluded() {
        // "flc" is 3 edits from "fleece".
        let matches = features().match_all(&["flc"]);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_match_all_deduplicates() {
        // Two terms both land on "wireless"; it appears once.
        let matches = features().match_all(&["wireless", "wirless"]);
        assert_eq!(matches, vec!["wireless"]);
    }

    #[test]
    fn test_match_best_prefers_lower_distance() {
        let brands = FuzzyTermMatcher::new(["puma", "nike"], 2);
        // "nike" is exact (distance 0); "puma" would also match "pume"
        // style typos but an exact hit on a later entry still wins.
        assert_eq!(brands.match_best(&["nike"]), Some("nike".to_string()));
    }

    #[test]
    fn test_match_best_tiebreak_is_dictionary_order() {
        let brands = FuzzyTermMatcher::new(["sonya", "sonyb"], 2);
        // "sony" is distance 1 from both; the earlier entry wins.
        assert_eq!(brands.match_best(&["sony"]), Some("sonya".to_string()));
    }

    #[test]
    fn test_match_best_none_when_nothing_close() {
        let brands = FuzzyTermMatcher::new(["nike", "adidas"], 2);
        assert_eq!(brands.match_best(&["refrigerator"]), None);
    }
}
