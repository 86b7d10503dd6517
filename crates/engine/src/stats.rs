//! Word-frequency statistics over buffered results
//!
//! Every accepted phrase has its (lowercased) words counted. The ranking
//! favours words that are both long and frequent, which surfaces the words
//! a user is most likely to want to include or exclude next.

use anagram_core::phrase_words;
use std::collections::HashMap;

/// A word and how many buffered phrases used it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    /// Lowercased word
    pub word: String,
    /// Occurrences across buffered phrases
    pub count: usize,
}

impl WordCount {
    /// Ranking score: length in characters times occurrences
    pub fn score(&self) -> usize {
        self.word.chars().count() * self.count
    }
}

/// Word-frequency table of one configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordStats {
    counts: HashMap<String, usize>,
}

impl WordStats {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the words of an accepted phrase
    pub fn record_phrase(&mut self, phrase: &str) {
        for word in phrase_words(phrase) {
            *self.counts.entry(word).or_insert(0) += 1;
        }
    }

    /// Occurrences of `word` (case-insensitive)
    pub fn count(&self, word: &str) -> usize {
        self.counts.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    /// Number of distinct words seen
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Best `n` words by [`WordCount::score`], ties broken alphabetically
    pub fn top_n(&self, n: usize) -> Vec<WordCount> {
        let mut ranked: Vec<WordCount> = self
            .counts
            .iter()
            .map(|(word, &count)| WordCount {
                word: word.clone(),
                count,
            })
            .collect();

        ranked.sort_by(|a, b| b.score().cmp(&a.score()).then_with(|| a.word.cmp(&b.word)));
        ranked.truncate(n);
        ranked
    }
}
