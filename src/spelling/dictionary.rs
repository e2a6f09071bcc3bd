//! Vocabulary management for spelling correction.
//!
//! The vocabulary is the fixed set of terms the corrector is allowed to
//! steer queries toward: brand names, categories, product features, and
//! common storefront words. Frequencies bias suggestion ranking toward the
//! terms shoppers actually type.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::{AHashMap, AHashSet};

use crate::error::Result;

/// A vocabulary of known terms and their frequencies.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Terms and their frequencies
    words: AHashMap<String, u32>,
    /// Set of all terms for fast membership checks
    word_set: AHashSet<String>,
    /// Total frequency for probability calculations
    total_count: u64,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Vocabulary::default()
    }

    /// Build a vocabulary from an iterator of terms, each with frequency 1.
    /// Duplicate terms accumulate.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Vocabulary::new();
        for term in terms {
            vocabulary.increment_word(term.as_ref());
        }
        vocabulary
    }

    /// Add a word with the given frequency, replacing any previous entry.
    pub fn add_word(&mut self, word: &str, frequency: u32) {
        let normalized = word.to_lowercase();

        let old_freq = self.words.get(&normalized).copied().unwrap_or(0);
        self.words.insert(normalized.clone(), frequency);
        self.word_set.insert(normalized);

        self.total_count = self.total_count - old_freq as u64 + frequency as u64;
    }

    /// Increment the frequency of a word by 1.
    pub fn increment_word(&mut self, word: &str) {
        let current = self.frequency(word);
        self.add_word(word, current + 1);
    }

    /// Check if a word exists in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.word_set.contains(&word.to_lowercase())
    }

    /// Get the frequency of a word.
    pub fn frequency(&self, word: &str) -> u32 {
        self.words.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    /// Get the probability of a word (frequency / total_count).
    pub fn probability(&self, word: &str) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.frequency(word) as f64 / self.total_count as f64
    }

    /// Iterate over all words with their frequencies.
    pub fn words(&self) -> impl Iterator<Item = (&str, u32)> {
        self.words.iter().map(|(w, f)| (w.as_str(), *f))
    }

    /// Number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Total frequency count.
    pub fn total_frequency(&self) -> u64 {
        self.total_count
    }

    /// Load a vocabulary from a text file with one word per line.
    /// Non-alphabetic lines are skipped.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut vocabulary = Vocabulary::new();
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && word.chars().all(|c| c.is_alphabetic() || c == '-') {
                vocabulary.increment_word(word);
            }
        }

        Ok(vocabulary)
    }
}
