//! Streaming result cache for anagram phrases
//!
//! This crate sits on top of the search:
//! - ResultCache: one active configuration, an LRU of recent ones
//! - ConfigState: buffered results, word statistics, lazy phrase source
//! - VocabularySelection: main, auxiliary and private vocabularies
//! - FetchControl / FetchWorker: one background fetch at a time, cooperative abort
//! - ResultCacheConfig: tuning, loadable from `anagrams.toml`
//!
//! The cache is the only component that knows about:
//! - Which configuration is active
//! - When phrases are pulled from the search, and on which thread

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod background;
pub mod cache;
pub mod config;
pub mod control;
pub mod selection;
pub mod state;
pub mod stats;

pub use background::{FetchWorker, WorkerShutdown};
pub use cache::{ResultCache, FETCH_THREAD_NAME};
pub use config::{ResultCacheConfig, CONFIG_FILE_NAME};
pub use control::{FetchControl, FetchPhase};
pub use selection::{VocabularyKey, VocabularySelection, PRIVATE_VOCABULARY_NAME};
pub use state::{ConfigKey, ConfigState, Phase};
pub use stats::{WordCount, WordStats};

pub use anagram_core::{Error, Result, Vocabulary, VocabularyKind};
