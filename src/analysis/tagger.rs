//! Rule-based part-of-speech tagging for shopping queries.
//!
//! Shopping queries are short noun phrases ("cheap nike running shoes
//! under 500"), so a full statistical tagger buys nothing. Tokens are
//! classified with a known-adjective lexicon, a handful of derivational
//! suffixes, a stopword list, and a numeric check; everything left over is
//! treated as a noun. Downstream matchers only care about the noun and
//! adjective buckets.

use ahash::AHashSet;

use crate::analysis::tokenizer::Token;

/// Coarse part-of-speech classes used by the query interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    /// Content noun (default class for unknown words).
    Noun,
    /// Adjective, from the lexicon or by suffix.
    Adjective,
    /// Numeric token.
    Number,
    /// Function word carrying no product meaning.
    Stop,
}

/// A token together with its assigned part of speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    /// Token text.
    pub text: String,
    /// Assigned class.
    pub pos: PartOfSpeech,
}

/// Adjective-like derivational suffixes checked for words outside the
/// adjective lexicon.
const ADJECTIVE_SUFFIXES: &[&str] = &["less", "able", "ible", "ous", "ful", "ive", "est", "proof"];

/// Rule-based tagger configured from the lexicon's adjective and stopword
/// lists.
#[derive(Debug, Clone)]
pub struct Tagger {
    adjectives: AHashSet<String>,
    stopwords: AHashSet<String>,
}

impl Tagger {
    /// Create a tagger from adjective and stopword lists.
    pub fn new<I, J, S>(adjectives: I, stopwords: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Tagger {
            adjectives: adjectives
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
            stopwords: stopwords
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Tag a token stream.
    pub fn tag(&self, tokens: &[Token]) -> Vec<TaggedToken> {
        tokens
            .iter()
            .map(|token| TaggedToken {
                text: token.text.clone(),
                pos: self.classify(token),
            })
            .collect()
    }

    /// Extract the content terms (nouns and adjectives) from tagged text,
    /// in query order.
    pub fn content_terms(tagged: &[TaggedToken]) -> Vec<String> {
        tagged
            .iter()
            .filter(|t| matches!(t.pos, PartOfSpeech::Noun | PartOfSpeech::Adjective))
            .map(|t| t.text.clone())
            .collect()
    }

    fn classify(&self, token: &Token) -> PartOfSpeech {
        if token.is_numeric() {
            return PartOfSpeech::Number;
        }
        if self.stopwords.contains(&token.text) {
            return PartOfSpeech::Stop;
        }
        if self.adjectives.contains(&token.text) {
            return PartOfSpeech::Adjective;
        }
        if ADJECTIVE_SUFFIXES
            .iter()
            .any(|suffix| token.text.len() > suffix.len() + 2 && token.text.ends_with(suffix))
        {
            return PartOfSpeech::Adjective;
        }
        PartOfSpeech::Noun
    }
}
