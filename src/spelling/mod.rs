//! Spelling correction for search queries.
//!
//! This module powers typo tolerance in the query interpreter: a product
//! vocabulary (brands, categories, features, common product terms), edit
//! distance primitives, a suggestion engine, and a per-token corrector that
//! substitutes the top-ranked suggestion before the rest of the pipeline
//! runs. Tokens with no suggestion pass through unchanged.

pub mod corrector;
pub mod dictionary;
pub mod levenshtein;
pub mod suggest;

pub use self::corrector::{CorrectorConfig, SpellingCorrector};
pub use self::dictionary::Vocabulary;
pub use self::levenshtein::{levenshtein_distance, levenshtein_distance_threshold};
pub use self::suggest::{Suggestion, SuggestionConfig, SuggestionEngine};
