//! Annotated dictionaries
//!
//! Pairs every vocabulary word with its precomputed [`LetterMultiset`] so the
//! search never recomputes signatures. Filtering produces a new dictionary
//! holding only the words that still fit a letter budget; the entries
//! themselves are reference counted and shared between all filtered lists.

use anagram_core::LetterMultiset;
use std::cmp::Ordering;
use std::sync::Arc;

// ============================================================================
// DictionaryEntry
// ============================================================================

/// A word and its letter signature
///
/// Computed once per word, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    word: String,
    letters: LetterMultiset,
    char_len: usize,
}

impl DictionaryEntry {
    /// Annotate a single word
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        let letters = LetterMultiset::from_text(&word);
        let char_len = word.chars().count();
        DictionaryEntry {
            word,
            letters,
            char_len,
        }
    }

    /// The word as it appears in the vocabulary
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Letter signature of the word
    pub fn letters(&self) -> &LetterMultiset {
        &self.letters
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.char_len
    }
}

/// Search order: longer words first, then lexicographically later first
///
/// Long words use up letters quickly, which keeps the branching factor of
/// the backtracking search small. The order is total for distinct words, so
/// the phrase sequence is reproducible.
pub fn search_order(a: &DictionaryEntry, b: &DictionaryEntry) -> Ordering {
    b.char_len
        .cmp(&a.char_len)
        .then_with(|| b.word.cmp(&a.word))
}

// ============================================================================
// AnnotatedDictionary
// ============================================================================

/// Ordered list of annotated words
#[derive(Debug, Clone, Default)]
pub struct AnnotatedDictionary {
    entries: Vec<Arc<DictionaryEntry>>,
}

impl AnnotatedDictionary {
    /// Annotate every word, preserving order
    pub fn build<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        AnnotatedDictionary {
            entries: words
                .into_iter()
                .map(|w| Arc::new(DictionaryEntry::new(w)))
                .collect(),
        }
    }

    /// Keep the entries of a slice whose letters fit inside `target`
    ///
    /// Relative order is preserved.
    pub fn filter_entries(entries: &[Arc<DictionaryEntry>], target: &LetterMultiset) -> Self {
        AnnotatedDictionary {
            entries: entries
                .iter()
                .filter(|e| e.letters.is_subset_of(target))
                .cloned()
                .collect(),
        }
    }

    /// Keep the entries whose letters fit inside `target`
    pub fn filter(&self, target: &LetterMultiset) -> Self {
        Self::filter_entries(&self.entries, target)
    }

    /// Reorder into search order (see [`search_order`])
    pub fn sorted(mut self) -> Self {
        self.entries.sort_by(|a, b| search_order(a, b));
        self
    }

    /// Build, filter against `target` and sort in one step
    pub fn candidates_for<I, W>(words: I, target: &LetterMultiset) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        Self::build(words).filter(target).sorted()
    }

    /// Entries in their current order
    pub fn entries(&self) -> &[Arc<DictionaryEntry>] {
        &self.entries
    }

    /// Words in their current order
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.word())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
