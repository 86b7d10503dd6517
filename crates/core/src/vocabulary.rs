//! Named word lists and the exclusion-aware merge
//!
//! Vocabularies arrive already parsed: an ordered list of distinct words with
//! a display name. Several of them are merged into the single word list the
//! search engine runs over.

use std::collections::HashSet;

/// Separator placed between member names of a merged vocabulary
pub const NAME_SEPARATOR: &str = " + ";

/// An ordered list of distinct words with a name and an enabled flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    name: String,
    words: Vec<String>,
    enabled: bool,
}

impl Vocabulary {
    /// Create an enabled vocabulary
    pub fn new<N, I, W>(name: N, words: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        Vocabulary {
            name: name.into(),
            words: words.into_iter().map(Into::into).collect(),
            enabled: true,
        }
    }

    /// Builder-style override of the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Words in their original order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Whether this vocabulary takes part in merges driven by a selection
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the enabled flag
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if there are no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Merge vocabularies into one deduplicated list
///
/// Excluded words are treated as already known, so they never make it into
/// the result. Every other word is kept the first time it is seen, in
/// vocabulary order. The merged name joins the member names with
/// [`NAME_SEPARATOR`]. Enabled flags are not consulted here; the caller
/// decides which vocabularies to pass.
///
/// # Example
///
/// ```
/// use anagram_core::vocabulary::{merge, Vocabulary};
///
/// let a = Vocabulary::new("a", ["one", "two"]);
/// let b = Vocabulary::new("b", ["two", "three"]);
/// let merged = merge(&["one"], [&a, &b]);
///
/// assert_eq!(merged.name(), "a + b");
/// assert_eq!(merged.words(), ["two", "three"]);
/// ```
pub fn merge<'a, S, I>(excluded: &[S], vocabularies: I) -> Vocabulary
where
    S: AsRef<str>,
    I: IntoIterator<Item = &'a Vocabulary>,
{
    let mut known: HashSet<&str> = excluded.iter().map(AsRef::as_ref).collect();
    let mut names = Vec::new();
    let mut words = Vec::new();

    for vocabulary in vocabularies {
        names.push(vocabulary.name());
        for word in vocabulary.words() {
            if known.insert(word.as_str()) {
                words.push(word.clone());
            }
        }
    }

    Vocabulary {
        name: names.join(NAME_SEPARATOR),
        words,
        enabled: true,
    }
}
