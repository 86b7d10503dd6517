//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use anagrams::{ResultCache, ResultCacheConfig, Vocabulary, VocabularySelection};

/// Words of the stock test vocabulary.
pub const COMMON_WORDS: &[&str] = &["pneumatic", "death", "hated", "foobar"];

/// Stock test vocabulary.
pub fn common_vocabulary() -> Vocabulary {
    Vocabulary::new("Common", COMMON_WORDS.iter().copied())
}

/// A larger vocabulary with plenty of short words for property tests.
pub fn word_soup() -> Vocabulary {
    Vocabulary::new(
        "Soup",
        [
            "a", "an", "ant", "tan", "nat", "eat", "tea", "ate", "net", "ten", "tee", "nee",
            "at", "ta", "ne", "en", "sea", "tse", "set", "sat", "east", "seat", "teas",
            "stane", "neat", "ante", "etna", "santa", "teen", "teens", "tense", "seen",
        ],
    )
}

/// Selection with the stock vocabulary as the only main vocabulary.
pub fn common_selection() -> VocabularySelection {
    VocabularySelection::new(vec![common_vocabulary()])
}

/// Cache over the stock vocabulary with default tuning.
pub fn create_cache() -> ResultCache {
    ResultCache::with_defaults(common_selection()).unwrap()
}

/// Cache over `vocabulary` with `config`.
pub fn create_cache_over(vocabulary: Vocabulary, config: ResultCacheConfig) -> ResultCache {
    ResultCache::new(VocabularySelection::new(vec![vocabulary]), config).unwrap()
}

/// Every result of the active configuration, fetched to exhaustion.
pub fn drain(cache: &ResultCache) -> Vec<String> {
    let mut index = 0;
    while cache.get_at(index).is_some() {
        index += 1;
    }
    cache.results()
}
