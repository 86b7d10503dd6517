//! Backtracking anagram phrase search
//!
//! [`search`] returns an [`AnagramSearch`], a lazy iterator over every phrase
//! built from vocabulary words whose letters are exactly those of the input.
//!
//! ## Algorithm
//!
//! ```text
//! recurse(prefix, remaining, candidates):
//!     if remaining is empty: emit prefix (unless prefix is empty)
//!     for i, entry in candidates:
//!         recurse(prefix + " " + entry.word,
//!                 remaining - entry.letters,
//!                 filter(candidates[i+1..], remaining - entry.letters))
//! ```
//!
//! Restricting each level to entries strictly after the chosen one means a
//! word is used at most once per phrase and every combination is visited
//! once, with its words in search order rather than in every permutation.
//!
//! The recursion is run on an explicit stack of immutable frames, so the
//! iterator does only the work needed for the next phrase and can be handed
//! to another thread.

use crate::dictionary::AnnotatedDictionary;
use anagram_core::LetterMultiset;
use std::collections::VecDeque;
use tracing::debug;

/// Starting point of one depth-first run
#[derive(Debug)]
struct Seed {
    prefix: String,
    remaining: LetterMultiset,
    candidates: AnnotatedDictionary,
}

/// One level of the recursion
///
/// `next` is the position of the next candidate to try; everything before
/// it has been explored already.
#[derive(Debug)]
struct Frame {
    prefix: String,
    remaining: LetterMultiset,
    candidates: AnnotatedDictionary,
    next: usize,
}

/// Lazy, deterministic sequence of anagram phrases
///
/// # Panics
///
/// Building or iterating panics if an include phrase or a candidate is not a
/// subset of the remaining budget. Both are checked before every
/// subtraction, so this only happens if that checking is broken; continuing
/// would yield phrases that are not anagrams.
#[derive(Debug)]
pub struct AnagramSearch {
    target: LetterMultiset,
    candidate_count: usize,
    seeds: VecDeque<Seed>,
    stack: Vec<Frame>,
}

/// Search for every phrase of `vocabulary` words that is an anagram of `input`
///
/// Each non-blank phrase in `includes` whose letters fit in the input seeds a
/// run whose results all start with that phrase. Seeds run in the given
/// order. If no include phrase fits, a single unseeded run is made.
///
/// # Example
///
/// ```
/// use anagram_search::search;
///
/// let vocabulary = ["pneumatic", "death", "hated", "foobar"];
/// let no_includes: [&str; 0] = [];
/// let phrases: Vec<String> = search("Mitch Patenaude", &no_includes, &vocabulary).collect();
///
/// assert_eq!(phrases, vec!["pneumatic hated", "pneumatic death"]);
/// ```
pub fn search<S, W>(input: &str, includes: &[S], vocabulary: &[W]) -> AnagramSearch
where
    S: AsRef<str>,
    W: AsRef<str>,
{
    let target = LetterMultiset::from_text(input);
    let candidates =
        AnnotatedDictionary::candidates_for(vocabulary.iter().map(|w| w.as_ref()), &target);

    let mut seeds = VecDeque::new();
    for phrase in includes.iter().map(|p| p.as_ref().trim()) {
        if phrase.is_empty() {
            continue;
        }
        let letters = LetterMultiset::from_text(phrase);
        if !letters.is_subset_of(&target) {
            debug!(target: "anagram::search", include = phrase, "Include phrase does not fit, skipped");
            continue;
        }
        let remaining = match target.subtract(&letters) {
            Ok(remaining) => remaining,
            Err(e) => panic!(
                "include {:?} passed the subset check but does not fit {:?}: {}",
                phrase,
                target.to_string(),
                e
            ),
        };
        seeds.push_back(Seed {
            prefix: phrase.to_string(),
            candidates: candidates.filter(&remaining),
            remaining,
        });
    }

    if seeds.is_empty() {
        seeds.push_back(Seed {
            prefix: String::new(),
            remaining: target.clone(),
            candidates: candidates.clone(),
        });
    }

    debug!(
        target: "anagram::search",
        candidates = candidates.len(),
        seeds = seeds.len(),
        "Search prepared"
    );

    AnagramSearch {
        target,
        candidate_count: candidates.len(),
        seeds,
        stack: Vec::new(),
    }
}

fn extend_prefix(prefix: &str, word: &str) -> String {
    if prefix.is_empty() {
        word.to_string()
    } else {
        format!("{} {}", prefix, word)
    }
}

impl AnagramSearch {
    /// Letters every produced phrase consists of
    pub fn target(&self) -> &LetterMultiset {
        &self.target
    }

    /// Number of vocabulary words that fit in the target at all
    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Enter a recursion level
    ///
    /// Returns the prefix when it is a complete phrase; otherwise pushes a
    /// frame if there is anything left to try.
    fn enter(
        &mut self,
        prefix: String,
        remaining: LetterMultiset,
        candidates: AnnotatedDictionary,
    ) -> Option<String> {
        if remaining.is_empty() {
            return (!prefix.is_empty()).then_some(prefix);
        }
        if !candidates.is_empty() {
            self.stack.push(Frame {
                prefix,
                remaining,
                candidates,
                next: 0,
            });
        }
        None
    }
}

impl Iterator for AnagramSearch {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                let seed = self.seeds.pop_front()?;
                if let Some(phrase) = self.enter(seed.prefix, seed.remaining, seed.candidates) {
                    return Some(phrase);
                }
                continue;
            };

            if frame.next >= frame.candidates.len() {
                self.stack.pop();
                continue;
            }

            let index = frame.next;
            frame.next += 1;

            let entries = frame.candidates.entries();
            let entry = &entries[index];
            let remaining = match frame.remaining.subtract(entry.letters()) {
                Ok(remaining) => remaining,
                Err(e) => panic!(
                    "candidate {:?} does not fit remaining letters {:?}: {}",
                    entry.word(),
                    frame.remaining.to_string(),
                    e
                ),
            };
            let candidates = AnnotatedDictionary::filter_entries(&entries[index + 1..], &remaining);
            let prefix = extend_prefix(&frame.prefix, entry.word());

            if let Some(phrase) = self.enter(prefix, remaining, candidates) {
                return Some(phrase);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_INCLUDES: [&str; 0] = [];

    fn test_vocabulary() -> Vec<&'static str> {
        vec!["pneumatic", "death", "hated", "foobar"]
    }

    // ========================================================================
    // Basic search
    // ========================================================================

    #[test]
    fn test_finds_both_phrases_in_order() {
        let results: Vec<String> = search("Mitch Patenaude", &NO_INCLUDES, &test_vocabulary()).collect();
        assert_eq!(results, vec!["pneumatic hated", "pneumatic death"]);
    }

    #[test]
    fn test_no_results() {
        let mut results = search("Quixotic", &NO_INCLUDES, &test_vocabulary());
        assert_eq!(results.candidate_count(), 0);
        assert!(results.next().is_none());
        // stays exhausted
        assert!(results.next().is_none());
    }

    #[test]
    fn test_empty_input_emits_nothing() {
        assert_eq!(search("", &NO_INCLUDES, &test_vocabulary()).count(), 0);
        assert_eq!(search("   ", &NO_INCLUDES, &test_vocabulary()).count(), 0);
    }

    #[test]
    fn test_empty_vocabulary() {
        let vocabulary: Vec<String> = Vec::new();
        assert_eq!(search("abc", &NO_INCLUDES, &vocabulary).count(), 0);
    }

    #[test]
    fn test_words_not_reused() {
        // "ab ab" would need the same word twice
        let results: Vec<String> = search("abab", &NO_INCLUDES, &["ab", "ba"]).collect();
        assert_eq!(results, vec!["ba ab"]);
    }

    #[test]
    fn test_no_permutation_duplicates() {
        let results: Vec<String> = search("abc", &NO_INCLUDES, &["a", "b", "c"]).collect();
        assert_eq!(results, vec!["c b a"]);
    }

    #[test]
    fn test_depth_first_order() {
        let vocabulary = ["abc", "ab", "c", "a", "bc", "b"];
        let results: Vec<String> = search("cab", &NO_INCLUDES, &vocabulary).collect();
        // sorted candidates: abc, bc, ab, c, b, a
        assert_eq!(results, vec!["abc", "bc a", "ab c", "c b a"]);
    }

    #[test]
    fn test_single_word_match() {
        let results: Vec<String> = search("Tea", &NO_INCLUDES, &["eat", "ate", "tea", "at"]).collect();
        assert_eq!(results, vec!["tea", "eat", "ate"]);
    }

    #[test]
    fn test_target_exposed() {
        let s = search("Mitch Patenaude", &NO_INCLUDES, &test_vocabulary());
        assert_eq!(s.target(), &LetterMultiset::from_text("mitchpatenaude"));
        assert_eq!(s.candidate_count(), 3);
    }

    // ========================================================================
    // Include phrases
    // ========================================================================

    #[test]
    fn test_include_prefix() {
        let results: Vec<String> = search("Mitch Patenaude", &["death"], &test_vocabulary()).collect();
        assert_eq!(results, vec!["death pneumatic"]);
    }

    #[test]
    fn test_include_not_fitting_is_skipped() {
        let results: Vec<String> =
            search("Mitch Patenaude", &["foobar"], &test_vocabulary()).collect();
        assert_eq!(results, vec!["pneumatic hated", "pneumatic death"]);
    }

    #[test]
    fn test_include_with_too_many_of_a_letter_is_skipped() {
        // Every letter occurs in the input, just not often enough
        let results: Vec<String> =
            search("Mitch Patenaude", &["aaa", "death"], &test_vocabulary()).collect();
        assert_eq!(results, vec!["death pneumatic"]);
    }

    #[test]
    fn test_blank_include_is_skipped() {
        let results: Vec<String> = search("Mitch Patenaude", &["  "], &test_vocabulary()).collect();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_multiple_includes_run_in_order() {
        let results: Vec<String> =
            search("Mitch Patenaude", &["hated", "foobar", "death"], &test_vocabulary()).collect();
        assert_eq!(results, vec!["hated pneumatic", "death pneumatic"]);
    }

    #[test]
    fn test_include_consuming_everything() {
        let results: Vec<String> = search("tea", &["Eat"], &["ate"]).collect();
        assert_eq!(results, vec!["Eat"]);
    }

    #[test]
    fn test_multiword_include() {
        let results: Vec<String> =
            search("Mitch Patenaude", &["tic pneuma"], &["death", "hated", "pneumatic"]).collect();
        assert_eq!(results, vec!["tic pneuma hated", "tic pneuma death"]);
    }

    // ========================================================================
    // Laziness
    // ========================================================================

    #[test]
    fn test_lazy_take() {
        let vocabulary: Vec<String> = ('a'..='z').map(|c| c.to_string()).collect();
        let alphabet: String = ('a'..='z').collect();
        // a single phrase of all 26 letters exists; taking it must not
        // require enumerating anything else
        let first: Vec<String> = search(&alphabet, &NO_INCLUDES, &vocabulary).take(1).collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].split(' ').count(), 26);
    }

    #[test]
    fn test_search_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<AnagramSearch>();
    }
}
