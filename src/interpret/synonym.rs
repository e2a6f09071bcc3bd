//! Synonym expansion over a static table.

use ahash::AHashMap;

/// Maximum candidate terms contributed per token (the original plus up to
/// two synonyms).
const MAX_TERMS_PER_TOKEN: usize = 3;

/// Static synonym table used to widen the full-text search terms.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: AHashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Build a table from word -> synonyms mappings.
    pub fn new(entries: AHashMap<String, Vec<String>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(word, synonyms)| {
                (
                    word.to_lowercase(),
                    synonyms.into_iter().map(|s| s.to_lowercase()).collect(),
                )
            })
            .collect();
        SynonymTable { entries }
    }

    /// Expand a token into itself plus up to two synonyms.
    pub fn expand(&self, token: &str) -> Vec<String> {
        let mut terms = vec![token.to_lowercase()];
        if let Some(synonyms) = self.entries.get(&terms[0]) {
            terms.extend(synonyms.iter().cloned());
        }
        terms.truncate(MAX_TERMS_PER_TOKEN);
        terms
    }

    /// Expand every token in order, flattened.
    pub fn expand_all<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .flat_map(|t| self.expand(t.as_ref()))
            .collect()
    }
}
