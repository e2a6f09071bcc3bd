//! Text analysis for search queries.
//!
//! Query analysis is deliberately small: normalization, whitespace
//! tokenization, and a rule-based part-of-speech tagger that is just good
//! enough to pull nouns and adjectives out of short shopping queries. There
//! is no language model here and none is needed at this query length.

pub mod tagger;
pub mod tokenizer;

pub use self::tagger::{PartOfSpeech, TaggedToken, Tagger};
pub use self::tokenizer::{Token, WhitespaceTokenizer, normalize};
