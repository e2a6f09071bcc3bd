//! The query interpreter: raw search text in, typed catalog query out.
//!
//! A strict linear pipeline runs once per request: normalize, correct
//! spelling, tag parts of speech, classify intent, extract a price range,
//! fuzzy-match features/brand/category, expand synonyms, then assemble a
//! [`FilterFragment`] and a combined search-term string. Stages that find
//! nothing contribute nothing; the only user-visible error is an empty
//! query. The interpreter is a pure function of its input plus the injected
//! [`Lexicon`].

pub mod intent;
pub mod lexicon;
pub mod matcher;
pub mod price;
pub mod synonym;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::{Tagger, WhitespaceTokenizer, normalize};
use crate::error::{Result, VitrineError};
use crate::query::{Constraint, FieldConstraint, FilterFragment, SortSpec};
use crate::spelling::SpellingCorrector;

pub use self::intent::ExtractedIntent;
pub use self::lexicon::Lexicon;
pub use self::matcher::FuzzyTermMatcher;
pub use self::price::PriceRange;
pub use self::synonym::SynonymTable;

/// Tuning knobs for the interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Maximum edit distance for feature/brand/category matching.
    pub max_match_distance: usize,
    /// Maximum edit distance for spelling correction.
    pub max_correction_distance: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_match_distance: 2,
            max_correction_distance: 2,
        }
    }
}

/// The interpreted form of a search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretedQuery {
    /// Filter constraints for the catalog store.
    pub filter: FilterFragment,
    /// Deduplicated search terms for the store's weighted text search.
    pub search_terms: String,
    /// Sort derived from the query's intent.
    pub sort: SortSpec,
    /// The intent itself, kept for logging and response shaping.
    pub intent: ExtractedIntent,
    /// The query after spelling correction.
    pub corrected_query: String,
}

/// Request-scoped search query pipeline.
///
/// Construction wires the static dictionaries into each stage once; the
/// interpreter is then shared read-only across request handlers.
#[derive(Debug, Clone)]
pub struct QueryInterpreter {
    tokenizer: WhitespaceTokenizer,
    corrector: SpellingCorrector,
    tagger: Tagger,
    synonyms: SynonymTable,
    feature_matcher: FuzzyTermMatcher,
    brand_matcher: FuzzyTermMatcher,
    category_matcher: FuzzyTermMatcher,
}

impl QueryInterpreter {
    /// Create an interpreter over the given lexicon with default tuning.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self::with_config(lexicon, InterpreterConfig::default())
    }

    /// Create an interpreter with custom tuning.
    pub fn with_config(lexicon: Arc<Lexicon>, config: InterpreterConfig) -> Self {
        let corrector = SpellingCorrector::with_config(
            lexicon.build_vocabulary(),
            crate::spelling::CorrectorConfig {
                max_distance: config.max_correction_distance,
                ..Default::default()
            },
        );

        QueryInterpreter {
            tokenizer: WhitespaceTokenizer::new(),
            corrector,
            tagger: Tagger::new(&lexicon.adjectives, &lexicon.stopwords),
            synonyms: SynonymTable::new(lexicon.synonyms.clone()),
            feature_matcher: FuzzyTermMatcher::new(&lexicon.features, config.max_match_distance),
            brand_matcher: FuzzyTermMatcher::new(&lexicon.brands, config.max_match_distance),
            category_matcher: FuzzyTermMatcher::new(&lexicon.categories, config.max_match_distance),
        }
    }

    /// Interpret a raw search query.
    ///
    /// Returns a query error for empty or whitespace-only input; any other
    /// well-formed text produces a filter and a non-empty search-term
    /// string. Extraction stages that find no signal degrade silently to a
    /// plain keyword search.
    pub fn interpret(&self, raw_query: &str) -> Result<InterpretedQuery> {
        let normalized = normalize(raw_query);
        if normalized.is_empty() {
            return Err(VitrineError::query("Search query is required"));
        }

        let corrected = self.corrector.correct_query(&normalized);
        let tokens = self.tokenizer.tokenize(&corrected);
        let token_texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        let tagged = self.tagger.tag(&tokens);
        let content_terms = Tagger::content_terms(&tagged);

        let intent = intent::detect(&token_texts);
        let price = price::extract(&corrected);
        let features = self.feature_matcher.match_all(&content_terms);
        let brand = self.brand_matcher.match_best(&content_terms);
        let category = self.category_matcher.match_best(&content_terms);
        let expanded = self.synonyms.expand_all(&token_texts);

        let mut filter = FilterFragment::new();

        if let Some(range) = price {
            filter.insert("price", range.to_constraint());
        }
        if let Some(brand) = &brand {
            filter.insert(
                "brand",
                Constraint::Contains {
                    value: brand.clone(),
                },
            );
        }
        if let Some(category) = &category {
            filter.insert(
                "category",
                Constraint::Contains {
                    value: category.clone(),
                },
            );
        }
        if !features.is_empty() {
            filter.set_any_of(vec![
                FieldConstraint::new(
                    "tags",
                    Constraint::AnyIn {
                        values: features.clone(),
                    },
                ),
                FieldConstraint::new(
                    "description",
                    Constraint::ContainsAny {
                        values: features.clone(),
                    },
                ),
            ]);
        }

        let search_terms = combine_terms(
            expanded
                .iter()
                .map(String::as_str)
                .chain(features.iter().map(String::as_str))
                .chain(brand.as_deref())
                .chain(category.as_deref())
                .chain(intent.keywords.iter().map(String::as_str)),
        );

        Ok(InterpretedQuery {
            filter,
            search_terms,
            sort: intent.sort,
            intent,
            corrected_query: corrected,
        })
    }
}

/// Deduplicate terms preserving first-seen order and join with spaces.
fn combine_terms<'a, I>(terms: I) -> String
where
    I: Iterator<Item = &'a str>,
{
    let mut seen = ahash::AHashSet::new();
    let mut combined: Vec<&str> = Vec::new();
    for term in terms {
        if !term.is_empty() && seen.insert(term) {
            combined.push(term);
        }
    }
    combined.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{SortField, SortOrder};

    fn interpreter() -> QueryInterpreter {
        QueryInterpreter::new(Arc::new(Lexicon::default()))
    }

    #[test]
    fn test_empty_query_is_an_error() {
        for input in ["", "   ", "\t\n"] {
            let err = interpreter().interpret(input).unwrap_err();
            assert!(err.is_user_error());
            assert_eq!(err.to_string(), "Query error: Search query is required");
        }
    }

    #[test]
    fn test_plain_query_degrades_to_keyword_search() {
        let result = interpreter().interpret("garden hose").unwrap();
        assert!(result.filter.is_empty());
        assert!(!result.search_terms.is_empty());
        assert_eq!(result.sort, SortSpec::price_ascending());
    }

    #[test]
    fn test_price_and_brand_extraction() {
        let result = interpreter().interpret("nike shoes under 1000").unwrap();

        assert_eq!(
            result.filter.get("price"),
            Some(&Constraint::Range {
                min: None,
                max: Some(1000.0),
            })
        );
        assert_eq!(
            result.filter.get("brand"),
            Some(&Constraint::Contains {
                value: "nike".into(),
            })
        );
    }

    #[test]
    fn test_intent_drives_sort() {
        let result = interpreter().interpret("best rated shoes").unwrap();
        assert_eq!(result.sort, SortSpec::new(SortField::Rating, SortOrder::Desc));
    }

    #[test]
    fn test_misspelled_feature_matches() {
        let result = interpreter().interpret("flece jacket").unwrap();
        // The corrector already fixes "flece"; either way the feature
        // matcher lands on "fleece".
        let tags = result.filter.any_of.iter().find(|c| c.field == "tags");
        match tags.map(|c| &c.constraint) {
            Some(Constraint::AnyIn { values }) => {
                assert!(values.contains(&"fleece".to_string()));
            }
            other => panic!("expected tags constraint, got {other:?}"),
        }
    }

    #[test]
    fn test_search_terms_are_deduplicated() {
        let result = interpreter().interpret("cheap cheap shoes").unwrap();
        let terms: Vec<&str> = result.search_terms.split(' ').collect();
        let mut sorted = terms.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(terms.len(), sorted.len(), "terms not unique: {terms:?}");
    }

    #[test]
    fn test_interpret_is_stable_on_its_own_output() {
        let first = interpreter().interpret("cheap wireless headphones").unwrap();
        let second = interpreter().interpret(&first.search_terms).unwrap();
        let third = interpreter().interpret(&second.search_terms).unwrap();

        // Synonym expansion must not feed back on itself.
        assert_eq!(second.search_terms, third.search_terms);
        assert!(second.search_terms.split(' ').count() <= 32);
    }

    #[test]
    fn test_category_fuzzy_match() {
        let result = interpreter().interpret("electronics sale").unwrap();
        assert_eq!(
            result.filter.get("category"),
            Some(&Constraint::Contains {
                value: "electronics".into(),
            })
        );
    }
}
