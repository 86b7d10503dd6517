//! Known inputs with known answers.

use crate::common::*;
use anagrams::{merge, search, LetterMultiset, Vocabulary};

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_and_cache_agree() {
    let no_includes: [&str; 0] = [];
    let direct: Vec<String> = search("Mitch Patenaude", &no_includes, COMMON_WORDS).collect();

    let cache = create_cache();
    cache.set_input("Mitch Patenaude");

    assert_eq!(drain(&cache), direct);
    assert_eq!(direct, vec!["pneumatic hated", "pneumatic death"]);
}

#[test]
fn test_quixotic() {
    let cache = create_cache();
    cache.set_input("Quixotic");

    assert!(drain(&cache).is_empty());
    assert!(cache.is_done());
    assert_eq!(cache.count(), 0);
}

#[test]
fn test_letter_multiset_scenarios() {
    assert_eq!(
        LetterMultiset::from_text("cba D"),
        LetterMultiset::from_text("d C B a")
    );
    assert!(!LetterMultiset::from_text("abcde").is_subset_of(&LetterMultiset::from_text("cba D")));
}

// ============================================================================
// Vocabulary Merge
// ============================================================================

#[test]
fn test_merge_then_search() {
    let first = Vocabulary::new("test_dict", ["Foo", "Bar", "baz", "QUUX"]);
    let second = Vocabulary::new("other", ["Fie", "Fy", "Foe", "Foo"]);

    let no_exclusions: [&str; 0] = [];
    let merged = merge(&no_exclusions, [&first, &second]);
    assert_eq!(merged.name(), "test_dict + other");
    assert_eq!(merged.len(), 7);

    let no_includes: [&str; 0] = [];
    let phrases: Vec<String> = search("Bar oof", &no_includes, merged.words()).collect();
    assert_eq!(phrases, vec!["Foo Bar"]);
}

#[test]
fn test_cache_reports_combined_name() {
    let cache = anagrams::ResultCache::with_defaults(
        anagrams::VocabularySelection::new(vec![common_vocabulary()])
            .with_auxiliary(vec![word_soup()]),
    )
    .unwrap();

    assert_eq!(cache.combined_vocabulary_name(), "Common + Soup");
    cache.set_auxiliary_enabled(0, false).unwrap();
    assert_eq!(cache.combined_vocabulary_name(), "Common");
}
