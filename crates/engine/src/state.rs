//! Per-configuration state: buffered results, statistics, lazy phrase source
//!
//! A configuration is everything that determines the result sequence: the
//! input phrase, inclusion phrases, excluded words and the vocabulary
//! combination. Its state moves through
//!
//! ```text
//! Building ──first pull──▶ Streaming ──exhausted──▶ Done
//! ```
//!
//! and its buffer only ever grows. Two locks guard it. The `source` lock is
//! held by the fetch loop for the duration of a fetch and serializes pulls.
//! The `buffer` lock is taken briefly for every append and for every read,
//! so readers never wait on the search itself.

use crate::control::FetchControl;
use crate::selection::VocabularyKey;
use crate::stats::{WordCount, WordStats};
use anagram_core::{normalize_phrase, Vocabulary};
use anagram_search::{search, AnagramSearch};
use parking_lot::{Condvar, Mutex};
use tracing::debug;

/// Everything that determines a result sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    /// Raw input phrase
    pub input: String,
    /// Inclusion phrases, in order
    pub inclusions: Vec<String>,
    /// Excluded words
    pub exclusions: Vec<String>,
    /// Vocabulary combination
    pub vocabulary: VocabularyKey,
}

/// Lifecycle of a configuration's result sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sequence not built yet
    Building,
    /// Sequence attached, results being pulled
    Streaming,
    /// Sequence exhausted (or abandoned after a failure)
    Done,
}

/// Why [`ConfigState::advance`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FetchOutcome {
    Reached,
    Exhausted,
    Aborted,
}

/// Result of [`ConfigState::wait_for`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    Found(String),
    Exhausted,
    /// Index missing and no fetch is running for this configuration
    Stalled,
}

#[derive(Debug)]
struct Buffer {
    results: Vec<String>,
    stats: WordStats,
    phase: Phase,
    fetching: bool,
}

enum Source {
    Pending {
        input: String,
        inclusions: Vec<String>,
        vocabulary: Vocabulary,
    },
    Attached(AnagramSearch),
    Exhausted,
}

/// Buffered results and lazy phrase source of one configuration
pub struct ConfigState {
    key: ConfigKey,
    normalized_input: String,
    vocabulary_name: String,
    buffer: Mutex<Buffer>,
    grown: Condvar,
    source: Mutex<Source>,
}

impl std::fmt::Debug for ConfigState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let buffer = self.buffer.lock();
        f.debug_struct("ConfigState")
            .field("key", &self.key)
            .field("vocabulary_name", &self.vocabulary_name)
            .field("results", &buffer.results.len())
            .field("phase", &buffer.phase)
            .finish()
    }
}

impl ConfigState {
    /// New configuration over an already merged vocabulary
    ///
    /// Nothing is searched until the first fetch.
    pub fn new(key: ConfigKey, vocabulary: Vocabulary) -> Self {
        ConfigState {
            normalized_input: normalize_phrase(&key.input),
            vocabulary_name: vocabulary.name().to_string(),
            source: Mutex::new(Source::Pending {
                input: key.input.clone(),
                inclusions: key.inclusions.clone(),
                vocabulary,
            }),
            buffer: Mutex::new(Buffer {
                results: Vec::new(),
                stats: WordStats::new(),
                phase: Phase::Building,
                fetching: false,
            }),
            grown: Condvar::new(),
            key,
        }
    }

    /// Configuration key
    pub fn key(&self) -> &ConfigKey {
        &self.key
    }

    /// Name of the merged vocabulary
    pub fn vocabulary_name(&self) -> &str {
        &self.vocabulary_name
    }

    /// Number of buffered results
    pub fn len(&self) -> usize {
        self.buffer.lock().results.len()
    }

    /// True if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.buffer.lock().phase
    }

    /// True once the sequence is exhausted
    pub fn is_done(&self) -> bool {
        self.phase() == Phase::Done
    }

    /// Buffered result at `index`, without waiting
    pub fn get(&self, index: usize) -> Option<String> {
        self.buffer.lock().results.get(index).cloned()
    }

    /// Snapshot of all buffered results
    pub fn results(&self) -> Vec<String> {
        self.buffer.lock().results.clone()
    }

    /// Best `n` words of the buffered results
    pub fn top_n(&self, n: usize) -> Vec<WordCount> {
        self.buffer.lock().stats.top_n(n)
    }

    /// Occurrences of `word` across buffered results
    pub fn word_count(&self, word: &str) -> usize {
        self.buffer.lock().stats.count(word)
    }

    /// Record that a fetch for this configuration has been scheduled
    pub(crate) fn start_fetch(&self) {
        self.buffer.lock().fetching = true;
    }

    /// Record that the scheduled fetch is over and wake every waiter
    pub(crate) fn end_fetch(&self) {
        let mut buffer = self.buffer.lock();
        buffer.fetching = false;
        self.grown.notify_all();
    }

    /// Give up on the sequence after the fetch loop failed
    ///
    /// Results buffered so far stay readable.
    pub(crate) fn mark_failed(&self) {
        *self.source.lock() = Source::Exhausted;
        let mut buffer = self.buffer.lock();
        buffer.phase = Phase::Done;
        self.grown.notify_all();
    }

    /// Pull phrases until `target` are buffered, the sequence runs out, or an
    /// abort is requested
    ///
    /// Phrases that normalize to the input itself are skipped. `progress` is
    /// called with `(buffered, target)` every `interval` appended phrases.
    pub(crate) fn advance(
        &self,
        target: usize,
        control: &FetchControl,
        interval: usize,
        progress: &dyn Fn(usize, usize),
    ) -> FetchOutcome {
        let mut source = self.source.lock();
        let mut appended = 0usize;

        loop {
            if self.len() >= target {
                return FetchOutcome::Reached;
            }
            if control.abort_requested() {
                return FetchOutcome::Aborted;
            }

            if let Source::Pending {
                input,
                inclusions,
                vocabulary,
            } = &*source
            {
                let sequence = search(input, inclusions.as_slice(), vocabulary.words());
                debug!(
                    target: "anagram::fetch",
                    input = %input,
                    candidates = sequence.candidate_count(),
                    "Phrase sequence attached"
                );
                *source = Source::Attached(sequence);
                self.buffer.lock().phase = Phase::Streaming;
            }

            let next = match &mut *source {
                Source::Attached(sequence) => sequence.next(),
                _ => None,
            };

            let Some(phrase) = next else {
                *source = Source::Exhausted;
                let mut buffer = self.buffer.lock();
                buffer.phase = Phase::Done;
                self.grown.notify_all();
                return FetchOutcome::Exhausted;
            };

            if normalize_phrase(&phrase) == self.normalized_input {
                continue;
            }

            let len = {
                let mut buffer = self.buffer.lock();
                buffer.stats.record_phrase(&phrase);
                buffer.results.push(phrase);
                self.grown.notify_all();
                buffer.results.len()
            };

            appended += 1;
            if appended % interval == 0 {
                progress(len, target);
            }
        }
    }

    /// Block until `index` is buffered, the sequence is done, or no fetch is
    /// running for this configuration
    pub(crate) fn wait_for(&self, index: usize) -> Lookup {
        let mut buffer = self.buffer.lock();
        loop {
            if let Some(phrase) = buffer.results.get(index) {
                return Lookup::Found(phrase.clone());
            }
            if buffer.phase == Phase::Done {
                return Lookup::Exhausted;
            }
            if !buffer.fetching {
                return Lookup::Stalled;
            }
            self.grown.wait(&mut buffer);
        }
    }
}
