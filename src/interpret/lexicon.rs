//! Static dictionaries backing the query interpreter.
//!
//! The lexicon is immutable configuration: loaded once at process start
//! (built-in defaults or a JSON file), wrapped in an `Arc`, and injected
//! into the interpreter. Nothing mutates it afterwards, so concurrent
//! request handlers can share it freely. Injecting it rather than reading
//! ambient globals is what makes the pipeline unit-testable with substitute
//! dictionaries.

use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VitrineError};
use crate::spelling::Vocabulary;

/// Immutable dictionaries for one storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Spellcheck vocabulary (beyond brands/categories/features, which are
    /// always included).
    pub vocabulary: Vec<String>,
    /// Synonym table: word -> synonyms.
    pub synonyms: AHashMap<String, Vec<String>>,
    /// Product feature terms.
    pub features: Vec<String>,
    /// Brand names.
    pub brands: Vec<String>,
    /// Category names.
    pub categories: Vec<String>,
    /// Known adjectives for the tagger.
    pub adjectives: Vec<String>,
    /// Function words ignored by the matchers.
    pub stopwords: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon {
            vocabulary: str_vec(&[
                "shoes", "sneakers", "shirt", "jacket", "laptop", "phone", "headphones",
                "watch", "bag", "cheap", "affordable", "budget", "best", "top", "rated",
                "latest", "new", "recent", "expensive", "premium", "luxury", "under",
                "below", "over", "above", "between", "less", "more", "than", "and",
            ]),
            synonyms: [
                ("cheap", vec!["affordable", "budget"]),
                ("expensive", vec!["premium", "luxury"]),
                ("fast", vec!["quick", "speedy"]),
                ("wireless", vec!["cordless", "untethered"]),
                ("shoes", vec!["sneakers", "footwear"]),
                ("phone", vec!["smartphone", "mobile"]),
                ("laptop", vec!["notebook"]),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), str_vec(&v)))
            .collect(),
            features: str_vec(&[
                "fleece",
                "ssd",
                "weatherproof",
                "wireless",
                "bluetooth",
                "touchscreen",
                "portable",
                "durable",
                "fast-charging",
            ]),
            brands: str_vec(&["nike", "adidas", "puma", "samsung", "apple", "sony"]),
            categories: str_vec(&["clothing", "electronics", "footwear", "accessories"]),
            adjectives: str_vec(&[
                "cheap", "affordable", "budget", "best", "top", "rated", "latest", "new",
                "recent", "expensive", "premium", "luxury", "fast", "red", "blue", "black",
                "white", "big", "small", "light", "heavy",
            ]),
            stopwords: str_vec(&[
                "a", "an", "the", "and", "or", "for", "with", "of", "in", "on", "to",
                "from", "by", "under", "below", "over", "above", "between", "less", "more",
                "than", "me", "show", "find", "buy",
            ]),
        }
    }
}

impl Lexicon {
    /// Load a lexicon from a JSON file. Missing fields fall back to the
    /// built-in defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            VitrineError::config(format!("failed to read lexicon file '{}': {}", path.display(), e))
        })?;

        let lexicon: Lexicon = serde_json::from_str(&content).map_err(|e| {
            VitrineError::config(format!("failed to parse lexicon file '{}': {}", path.display(), e))
        })?;

        Ok(lexicon)
    }

    /// Build the spellcheck vocabulary: the configured word list plus every
    /// brand, category, feature, synonym, and adjective the interpreter can
    /// produce. Keeping all target terms in the vocabulary stops the
    /// corrector from rewriting words the later stages depend on.
    pub fn build_vocabulary(&self) -> Vocabulary {
        let mut vocabulary = Vocabulary::from_terms(&self.vocabulary);
        for term in self
            .brands
            .iter()
            .chain(&self.categories)
            .chain(&self.features)
            .chain(&self.adjectives)
            .chain(&self.stopwords)
        {
            if !vocabulary.contains(term) {
                vocabulary.increment_word(term);
            }
        }
        for (word, synonyms) in &self.synonyms {
            for term in std::iter::once(word).chain(synonyms) {
                if !vocabulary.contains(term) {
                    vocabulary.increment_word(term);
                }
            }
        }
        vocabulary
    }
}

fn str_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
