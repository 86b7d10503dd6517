//! Anagrams - multi-word anagram phrase search with a streaming result cache
//!
//! Finds every phrase, built from the words of one or more vocabularies,
//! whose letters are exactly the letters of an input phrase. Results are
//! produced lazily and in a deterministic order.
//!
//! # Quick Start
//!
//! ```
//! use anagrams::{ResultCache, Vocabulary, VocabularySelection};
//!
//! let selection = VocabularySelection::new(vec![Vocabulary::new(
//!     "Common",
//!     ["pneumatic", "death", "hated", "foobar"],
//! )]);
//! let cache = ResultCache::with_defaults(selection)?;
//!
//! cache.set_input("Mitch Patenaude");
//! assert_eq!(cache.get_at(0).as_deref(), Some("pneumatic hated"));
//! # Ok::<(), anagrams::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `anagram-core`: letter multisets, phrase normalization, vocabularies
//! - `anagram-search`: the lazy backtracking search
//! - `anagram-engine`: the configuration-keyed result cache and its worker
//!
//! The search can be used on its own through [`search`]; the cache adds
//! background fetching, reuse of earlier configurations and statistics.

pub use anagram_core::{
    merge, normalize_phrase, phrase_words, Error, LetterMultiset, Result, Vocabulary,
    VocabularyKind,
};
pub use anagram_engine::{
    ConfigKey, FetchPhase, Phase, ResultCache, ResultCacheConfig, VocabularySelection, WordCount,
    CONFIG_FILE_NAME,
};
pub use anagram_search::{search, AnagramSearch, AnnotatedDictionary, DictionaryEntry};
