//! Phrase normalization helpers
//!
//! Results are compared against the input phrase after normalization so the
//! input is never reported as an anagram of itself, and result words are
//! counted in lowercase for the frequency table.

/// Normalize a phrase for self-comparison
///
/// - Lowercase
/// - Drop everything that is neither a letter nor whitespace
/// - Sort the words
///
/// # Example
///
/// ```
/// use anagram_core::phrase::normalize_phrase;
///
/// assert_eq!(normalize_phrase("  Hated, Pneumatic "), "hated pneumatic");
/// assert_eq!(normalize_phrase("pneumatic HATED"), "hated pneumatic");
/// ```
pub fn normalize_phrase(phrase: &str) -> String {
    let cleaned: String = phrase
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let mut words: Vec<&str> = cleaned.split_whitespace().collect();
    words.sort_unstable();
    words.join(" ")
}

/// Lowercased words of a phrase, in order
///
/// # Example
///
/// ```
/// use anagram_core::phrase::phrase_words;
///
/// let words: Vec<String> = phrase_words("Pneumatic  Death").collect();
/// assert_eq!(words, vec!["pneumatic", "death"]);
/// ```
pub fn phrase_words(phrase: &str) -> impl Iterator<Item = String> + '_ {
    phrase.split_whitespace().map(str::to_lowercase)
}
