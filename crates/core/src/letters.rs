//! Letter multisets
//!
//! A [`LetterMultiset`] is the canonical signature of a phrase for anagram
//! purposes: how many times each (case-folded) character occurs, ignoring
//! whitespace. Two phrases are anagrams of each other exactly when their
//! multisets are equal.
//!
//! Multisets are immutable. Subtraction returns a freshly allocated value,
//! so one multiset can be shared freely across search frames and threads.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Fold a character to the single lowercase character used as a multiset key
///
/// Characters whose lowercase form expands to several code points keep the
/// first one, so every input character maps to exactly one key.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Case and space insensitive per-character occurrence count
///
/// # Invariants
///
/// - Every stored count is greater than zero
/// - Keys are already case-folded
///
/// # Example
///
/// ```
/// use anagram_core::LetterMultiset;
///
/// let a = LetterMultiset::from_text("cba D");
/// let b = LetterMultiset::from_text("d C B a");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LetterMultiset {
    counts: BTreeMap<char, usize>,
}

impl LetterMultiset {
    /// Create an empty multiset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the multiset of a piece of text
    ///
    /// Whitespace is skipped and every other character is case-folded and
    /// counted. Punctuation is not stripped here; callers that want
    /// letters-only signatures must clean their input first.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            *counts.entry(fold(c)).or_insert(0) += 1;
        }
        LetterMultiset { counts }
    }

    /// Occurrences of `ch` (case-insensitive), zero when absent
    pub fn count(&self, ch: char) -> usize {
        self.counts.get(&fold(ch)).copied().unwrap_or(0)
    }

    /// Whether `ch` occurs at least once
    pub fn contains(&self, ch: char) -> bool {
        self.count(ch) > 0
    }

    /// Whether every count in `self` is at most the matching count in `other`
    pub fn is_subset_of(&self, other: &LetterMultiset) -> bool {
        self.counts
            .iter()
            .all(|(&ch, &n)| n <= other.counts.get(&ch).copied().unwrap_or(0))
    }

    /// Remove `other` from `self`
    ///
    /// Only valid when `other.is_subset_of(self)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSuperset`] naming the first character whose count
    /// in `other` exceeds the count in `self`.
    pub fn subtract(&self, other: &LetterMultiset) -> Result<LetterMultiset> {
        if let Some((&letter, &requested)) = other
            .counts
            .iter()
            .find(|&(ch, &n)| n > self.counts.get(ch).copied().unwrap_or(0))
        {
            return Err(Error::NotSuperset {
                letter,
                available: self.counts.get(&letter).copied().unwrap_or(0),
                requested,
            });
        }

        let counts = self
            .counts
            .iter()
            .filter_map(|(&ch, &n)| {
                let left = n - other.counts.get(&ch).copied().unwrap_or(0);
                (left > 0).then_some((ch, left))
            })
            .collect();
        Ok(LetterMultiset { counts })
    }

    /// Sum of both multisets' counts
    pub fn union(&self, other: &LetterMultiset) -> LetterMultiset {
        let mut counts = self.counts.clone();
        for (&ch, &n) in &other.counts {
            *counts.entry(ch).or_insert(0) += n;
        }
        LetterMultiset { counts }
    }

    /// True when no characters are left
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct characters
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Total number of characters, counting repeats
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `(character, count)` pairs in character order
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().map(|(&ch, &n)| (ch, n))
    }
}

impl fmt::Display for LetterMultiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ch, n) in self.iter() {
            for _ in 0..n {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

impl From<&str> for LetterMultiset {
    fn from(text: &str) -> Self {
        LetterMultiset::from_text(text)
    }
}
