//! The streaming result cache
//!
//! [`ResultCache`] keeps exactly one active configuration and a bounded LRU
//! of recently used ones. Every setter aborts the fetch in flight, recomputes
//! the configuration key and either reactivates a cached configuration
//! verbatim or creates a fresh one over the merged vocabulary.
//!
//! ## Fetching
//!
//! Phrases are produced on a single background worker. [`ResultCache::fetch_to`]
//! never blocks: it claims the [`FetchControl`] or backs off. Readers use
//! [`ResultCache::get_at`], which fetches ahead by `fetch_margin` and waits on
//! the configuration's condition variable until the index shows up.
//!
//! ## Lock order
//!
//! `settings` → `active` → `configs`. A configuration's `source` lock is
//! taken before its `buffer` lock. Setters abort the fetch in flight before
//! taking any of them, and nothing waits on a condition variable while
//! holding one, so callbacks may read the cache. They must not call
//! [`ResultCache::get_at`] or a setter, which wait for the worker they run
//! on.

use crate::background::{panic_message, FetchWorker};
use crate::config::ResultCacheConfig;
use crate::control::{FetchControl, FetchPhase};
use crate::selection::VocabularySelection;
use crate::state::{ConfigKey, ConfigState, Lookup, Phase};
use crate::stats::WordCount;
use anagram_core::{Error, Result};
use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use std::num::NonZeroUsize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Name of the background fetch thread
pub const FETCH_THREAD_NAME: &str = "anagram-fetch";

type ProgressFn = dyn Fn(usize, usize) + Send + Sync;
type WorkingFn = dyn Fn() + Send + Sync;

#[derive(Clone, Default)]
struct Callbacks {
    progress: Option<Arc<ProgressFn>>,
    start: Option<Arc<WorkingFn>>,
    stop: Option<Arc<WorkingFn>>,
}

/// User-controlled part of the configuration key
struct Settings {
    input: String,
    inclusions: Vec<String>,
    exclusions: Vec<String>,
    selection: VocabularySelection,
}

impl Settings {
    fn key(&self) -> ConfigKey {
        ConfigKey {
            input: self.input.clone(),
            inclusions: self.inclusions.clone(),
            exclusions: self.exclusions.clone(),
            vocabulary: self.selection.key(),
        }
    }
}

/// Configuration-keyed, lazily filled cache of anagram phrases
///
/// # Example
///
/// ```
/// use anagram_engine::{ResultCache, Vocabulary, VocabularySelection};
///
/// let selection = VocabularySelection::new(vec![Vocabulary::new(
///     "Common",
///     ["pneumatic", "death", "hated", "foobar"],
/// )]);
/// let cache = ResultCache::with_defaults(selection).unwrap();
///
/// cache.set_input("Mitch Patenaude");
/// assert_eq!(cache.get_at(0).as_deref(), Some("pneumatic hated"));
/// assert_eq!(cache.get_at(1).as_deref(), Some("pneumatic death"));
/// assert_eq!(cache.get_at(2), None);
/// ```
pub struct ResultCache {
    config: ResultCacheConfig,
    settings: Mutex<Settings>,
    active: RwLock<Arc<ConfigState>>,
    configs: Mutex<LruCache<ConfigKey, Arc<ConfigState>>>,
    control: Arc<FetchControl>,
    callbacks: RwLock<Callbacks>,
    worker: FetchWorker,
}

impl ResultCache {
    /// Create a cache over `selection`
    ///
    /// The initial configuration has an empty input, so it has no results.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if `config` fails validation, [`Error::Io`]
    /// if the fetch thread cannot be spawned.
    pub fn new(selection: VocabularySelection, config: ResultCacheConfig) -> Result<Self> {
        config.validate()?;
        let capacity = NonZeroUsize::new(config.capacity)
            .ok_or_else(|| Error::InvalidConfig("capacity must be non-zero".to_string()))?;

        let settings = Settings {
            input: String::new(),
            inclusions: Vec::new(),
            exclusions: Vec::new(),
            selection,
        };
        let key = settings.key();
        let initial = Arc::new(ConfigState::new(
            key.clone(),
            settings.selection.merged(&settings.exclusions),
        ));
        let mut configs = LruCache::new(capacity);
        configs.push(key, Arc::clone(&initial));

        let cache = ResultCache {
            worker: FetchWorker::new(FETCH_THREAD_NAME)?,
            config,
            settings: Mutex::new(settings),
            active: RwLock::new(initial),
            configs: Mutex::new(configs),
            control: Arc::new(FetchControl::new()),
            callbacks: RwLock::new(Callbacks::default()),
        };
        debug!(
            target: "anagram::cache",
            capacity = cache.config.capacity,
            vocabulary = %cache.combined_vocabulary_name(),
            "Result cache created"
        );
        Ok(cache)
    }

    /// Create a cache with [`ResultCacheConfig::default`]
    pub fn with_defaults(selection: VocabularySelection) -> Result<Self> {
        Self::new(selection, ResultCacheConfig::default())
    }

    /// Tuning this cache was created with
    pub fn config(&self) -> &ResultCacheConfig {
        &self.config
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Set the phrase to find anagrams of
    pub fn set_input(&self, phrase: impl Into<String>) {
        let phrase = phrase.into();
        self.switch(|settings| settings.input = phrase);
    }

    /// Set the phrases every result must start with
    ///
    /// Results of each fitting phrase come in the given order. Blank phrases
    /// and phrases that do not fit in the input are ignored.
    pub fn set_inclusions<I, S>(&self, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        self.switch(|settings| settings.inclusions = phrases);
    }

    /// Set the words no result may contain
    pub fn set_exclusions<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        self.switch(|settings| settings.exclusions = words);
    }

    /// Select the main vocabulary
    ///
    /// # Errors
    ///
    /// [`Error::UnknownVocabulary`] if there is no main vocabulary at
    /// `index`. The active configuration is left untouched.
    pub fn set_main_vocabulary(&self, index: usize) -> Result<()> {
        self.switch_with(|settings| settings.selection.select_main(index))
            .map_err(|e| {
                warn!(target: "anagram::cache", "Selection rejected: {}", e);
                e
            })
    }

    /// Enable or disable an auxiliary vocabulary
    ///
    /// # Errors
    ///
    /// [`Error::UnknownVocabulary`] if there is no auxiliary vocabulary at
    /// `index`. The active configuration is left untouched.
    pub fn set_auxiliary_enabled(&self, index: usize, enabled: bool) -> Result<()> {
        self.switch_with(|settings| settings.selection.set_auxiliary_enabled(index, enabled))
            .map_err(|e| {
                warn!(target: "anagram::cache", "Selection rejected: {}", e);
                e
            })
    }

    /// Replace the private vocabulary's words
    ///
    /// Configurations built over the previous words stay cached but can no
    /// longer be reactivated.
    pub fn set_private_vocabulary<I, W>(&self, words: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        self.switch(|settings| settings.selection.set_private_words(words));
    }

    /// Enable or disable the private vocabulary
    pub fn set_private_enabled(&self, enabled: bool) {
        self.switch(|settings| settings.selection.set_private_enabled(enabled));
    }

    /// [`Self::switch_with`] for a change that cannot be rejected
    fn switch<F>(&self, change: F)
    where
        F: FnOnce(&mut Settings),
    {
        let _ = self.switch_with(|settings| {
            change(settings);
            Ok(())
        });
    }

    /// Apply `change` to the settings and activate the configuration they
    /// now describe
    ///
    /// The fetch in flight is aborted before `settings` is locked, so a
    /// callback reading the settings never waits on this switch. If `change`
    /// fails, the settings and the active configuration stay as they were.
    fn switch_with<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Settings) -> Result<()>,
    {
        let state = loop {
            self.control.abort();
            let mut settings = self.settings.lock();
            let mut active = self.active.write();
            // Starting a fetch needs `active`, so none can begin until the swap is done
            if self.control.is_fetching() {
                continue;
            }

            change(&mut settings)?;
            let state = self.lookup_or_insert(settings.key(), &settings);
            *active = Arc::clone(&state);
            break state;
        };

        if self.config.initial_fetch > 0 {
            self.begin_fetch(&state, self.config.initial_fetch);
        }
        Ok(())
    }

    /// Cached configuration for `key`, or a fresh one over the merged vocabulary
    fn lookup_or_insert(&self, key: ConfigKey, settings: &Settings) -> Arc<ConfigState> {
        let mut configs = self.configs.lock();
        if let Some(state) = configs.get(&key) {
            debug!(
                target: "anagram::cache",
                input = %key.input,
                buffered = state.len(),
                "Configuration hit"
            );
            return Arc::clone(state);
        }

        let vocabulary = settings.selection.merged(&settings.exclusions);
        debug!(
            target: "anagram::cache",
            input = %key.input,
            vocabulary = vocabulary.name(),
            words = vocabulary.len(),
            "Configuration miss"
        );
        let state = Arc::new(ConfigState::new(key.clone(), vocabulary));
        if let Some((evicted, _)) = configs.push(key, Arc::clone(&state)) {
            info!(
                target: "anagram::cache",
                input = %evicted.input,
                capacity = self.config.capacity,
                "Configuration evicted"
            );
        }
        state
    }

    // ========================================================================
    // Fetching
    // ========================================================================

    /// Fetch the active configuration up to `target` results in the background
    ///
    /// Returns `false` without doing anything if a fetch is already in
    /// flight, or if the configuration already holds `target` results or is
    /// done.
    pub fn fetch_to(&self, target: usize) -> bool {
        let active = self.active.read();
        self.begin_fetch(&active, target)
    }

    /// Result at `index` of the active configuration
    ///
    /// Fetches ahead by `fetch_margin` when needed and blocks until the
    /// result is available. Returns `None` if the configuration runs out
    /// first, or stops being the active one while waiting.
    pub fn get_at(&self, index: usize) -> Option<String> {
        let wanted = index.saturating_add(self.config.fetch_margin);
        let state = {
            let active = self.active.read();
            if active.len() < wanted {
                self.begin_fetch(&active, wanted);
            }
            Arc::clone(&*active)
        };

        loop {
            match state.wait_for(index) {
                Lookup::Found(phrase) => return Some(phrase),
                Lookup::Exhausted => return None,
                Lookup::Stalled => {}
            }

            {
                let active = self.active.read();
                if !Arc::ptr_eq(&*active, &state) {
                    debug!(target: "anagram::cache", index, "Configuration retired while waiting");
                    return None;
                }
                if self.begin_fetch(&state, wanted) {
                    continue;
                }
            }

            if self.control.is_fetching() {
                self.control.wait_idle();
                continue;
            }
            return state.get(index);
        }
    }

    /// Stop the fetch in flight, if any, and wait until it has stopped
    ///
    /// Returns `true` if a fetch was running.
    pub fn abort(&self) -> bool {
        let aborted = self.control.abort();
        if aborted {
            debug!(target: "anagram::cache", "Fetch aborted");
        }
        aborted
    }

    /// Block until no fetch is in flight
    pub fn wait_for_fetch(&self) {
        self.control.wait_idle();
    }

    /// State of the fetch loop
    pub fn fetch_phase(&self) -> FetchPhase {
        self.control.phase()
    }

    /// Claim the control and hand a fetch of `state` to the worker
    fn begin_fetch(&self, state: &Arc<ConfigState>, target: usize) -> bool {
        if state.is_done() || state.len() >= target {
            return false;
        }
        if !self.control.try_begin() {
            return false;
        }
        // The previous fetch may have got there between the check and the claim
        if state.is_done() || state.len() >= target {
            self.control.finish();
            return false;
        }

        state.start_fetch();
        let job = FetchJob {
            state: Arc::clone(state),
            control: Arc::clone(&self.control),
            callbacks: self.callbacks.read().clone(),
            target,
            interval: self.config.progress_interval,
        };

        match self.worker.submit(move || job.run()) {
            Ok(()) => true,
            Err(e) => {
                warn!(target: "anagram::cache", "Fetch not scheduled: {}", e);
                state.end_fetch();
                self.control.finish();
                false
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of buffered results of the active configuration
    pub fn count(&self) -> usize {
        self.active.read().len()
    }

    /// True if the active configuration has no buffered results
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// True once the active configuration's sequence is exhausted
    pub fn is_done(&self) -> bool {
        self.active.read().is_done()
    }

    /// Lifecycle phase of the active configuration
    pub fn phase(&self) -> Phase {
        self.active.read().phase()
    }

    /// Snapshot of the active configuration's buffered results
    pub fn results(&self) -> Vec<String> {
        self.active.read().results()
    }

    /// Best `n` words of the active configuration's results
    ///
    /// Ranked by length in characters times occurrences, ties broken
    /// alphabetically.
    pub fn top_n_words(&self, n: usize) -> Vec<WordCount> {
        self.active.read().top_n(n)
    }

    /// Occurrences of `word` in the active configuration's results
    pub fn word_count(&self, word: &str) -> usize {
        self.active.read().word_count(word)
    }

    /// Name of the active configuration's merged vocabulary
    pub fn combined_vocabulary_name(&self) -> String {
        self.active.read().vocabulary_name().to_string()
    }

    /// Current input phrase
    pub fn input(&self) -> String {
        self.settings.lock().input.clone()
    }

    /// Current inclusion phrases
    pub fn inclusions(&self) -> Vec<String> {
        self.settings.lock().inclusions.clone()
    }

    /// Current excluded words
    pub fn exclusions(&self) -> Vec<String> {
        self.settings.lock().exclusions.clone()
    }

    /// Number of configurations held in the LRU, the active one included
    pub fn cached_configurations(&self) -> usize {
        self.configs.lock().len()
    }

    // ========================================================================
    // Callbacks
    // ========================================================================

    /// Called on the worker with `(buffered, target)` as a fetch progresses
    ///
    /// Applies to fetches started after this call.
    pub fn set_progress_callback<F>(&self, callback: F)
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.callbacks.write().progress = Some(Arc::new(callback));
    }

    /// Called on the worker when a fetch starts and when it stops
    ///
    /// Applies to fetches started after this call.
    pub fn set_working_callbacks<S, T>(&self, start: S, stop: T)
    where
        S: Fn() + Send + Sync + 'static,
        T: Fn() + Send + Sync + 'static,
    {
        let mut callbacks = self.callbacks.write();
        callbacks.start = Some(Arc::new(start));
        callbacks.stop = Some(Arc::new(stop));
    }
}

impl Drop for ResultCache {
    fn drop(&mut self) {
        self.control.abort();
        self.worker.shutdown();
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("config", &self.config)
            .field("active", &*self.active.read())
            .field("cached", &self.cached_configurations())
            .field("fetch_phase", &self.control.phase())
            .finish()
    }
}

/// One scheduled fetch, run on the worker
struct FetchJob {
    state: Arc<ConfigState>,
    control: Arc<FetchControl>,
    callbacks: Callbacks,
    target: usize,
    interval: usize,
}

/// Releases the configuration and the control even if the fetch unwinds
struct FetchGuard<'a> {
    state: &'a ConfigState,
    control: &'a FetchControl,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.state.end_fetch();
        self.control.finish();
    }
}

impl FetchJob {
    fn run(self) {
        let _guard = FetchGuard {
            state: &self.state,
            control: &self.control,
        };
        let input = &self.state.key().input;
        debug!(target: "anagram::fetch", input = %input, target = self.target, "Fetch started");

        if let Some(start) = &self.callbacks.start {
            contain_callback(input, "start", || start());
        }
        let progress = |buffered: usize, target: usize| {
            if let Some(progress) = &self.callbacks.progress {
                contain_callback(input, "progress", || progress(buffered, target));
            }
        };

        // Callbacks are contained above, so a panic here is the search failing
        match catch_unwind(AssertUnwindSafe(|| {
            self.state
                .advance(self.target, &self.control, self.interval, &progress)
        })) {
            Ok(outcome) => debug!(
                target: "anagram::fetch",
                input = %input,
                ?outcome,
                buffered = self.state.len(),
                "Fetch stopped"
            ),
            Err(payload) => {
                error!(
                    target: "anagram::fetch",
                    input = %input,
                    buffered = self.state.len(),
                    "Phrase search failed: {}",
                    panic_message(payload.as_ref())
                );
                self.state.mark_failed();
            }
        }

        progress(self.target, self.target);
        if let Some(stop) = &self.callbacks.stop {
            contain_callback(input, "stop", || stop());
        }
    }
}

/// Run a user callback, logging a panic instead of failing the fetch
fn contain_callback(input: &str, name: &str, callback: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(callback)) {
        warn!(
            target: "anagram::fetch",
            input = %input,
            callback = name,
            "Callback panicked: {}",
            panic_message(payload.as_ref())
        );
    }
}
