//! Which vocabularies a search runs over
//!
//! Exactly one main vocabulary is selected at a time. Auxiliary vocabularies
//! and the user's private vocabulary are layered on top when enabled. The
//! merge order is main, then enabled auxiliaries in order, then private.

use anagram_core::vocabulary::merge;
use anagram_core::{Error, Result, Vocabulary, VocabularyKind};
use std::sync::Arc;

/// Display name given to a private vocabulary created from bare words
pub const PRIVATE_VOCABULARY_NAME: &str = "Private";

/// Identity of a vocabulary combination
///
/// Equal keys always merge to the same word list: the private vocabulary's
/// `generation` changes whenever its words are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VocabularyKey {
    /// Selected main vocabulary
    pub main: usize,
    /// Indices of enabled auxiliary vocabularies
    pub auxiliary: Vec<usize>,
    /// Whether the private vocabulary takes part
    pub private: bool,
    /// Revision of the private vocabulary's words
    pub generation: u64,
}

#[derive(Debug, Clone)]
struct Slot {
    vocabulary: Arc<Vocabulary>,
    enabled: bool,
}

impl Slot {
    fn new(vocabulary: Vocabulary) -> Self {
        Slot {
            enabled: vocabulary.is_enabled(),
            vocabulary: Arc::new(vocabulary),
        }
    }
}

/// The set of available vocabularies and which ones are in use
#[derive(Debug, Clone, Default)]
pub struct VocabularySelection {
    main: Vec<Arc<Vocabulary>>,
    main_index: usize,
    auxiliary: Vec<Slot>,
    private: Option<Slot>,
    generation: u64,
}

impl VocabularySelection {
    /// Selection over the given main vocabularies, the first one selected
    pub fn new(main: Vec<Vocabulary>) -> Self {
        VocabularySelection {
            main: main.into_iter().map(Arc::new).collect(),
            ..Self::default()
        }
    }

    /// Add auxiliary vocabularies; each starts enabled per its own flag
    pub fn with_auxiliary(mut self, auxiliary: Vec<Vocabulary>) -> Self {
        self.auxiliary.extend(auxiliary.into_iter().map(Slot::new));
        self
    }

    /// Set the private vocabulary; it starts enabled per its own flag
    pub fn with_private(mut self, private: Vocabulary) -> Self {
        self.private = Some(Slot::new(private));
        self.generation += 1;
        self
    }

    /// Select the main vocabulary
    ///
    /// # Errors
    ///
    /// [`Error::UnknownVocabulary`] if `index` is out of range; the
    /// selection is left unchanged.
    pub fn select_main(&mut self, index: usize) -> Result<()> {
        if index >= self.main.len() {
            return Err(Error::UnknownVocabulary {
                kind: VocabularyKind::Main,
                index,
            });
        }
        self.main_index = index;
        Ok(())
    }

    /// Enable or disable an auxiliary vocabulary
    ///
    /// # Errors
    ///
    /// [`Error::UnknownVocabulary`] if `index` is out of range.
    pub fn set_auxiliary_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        let slot = self
            .auxiliary
            .get_mut(index)
            .ok_or(Error::UnknownVocabulary {
                kind: VocabularyKind::Auxiliary,
                index,
            })?;
        slot.enabled = enabled;
        Ok(())
    }

    /// Replace the private vocabulary's words
    ///
    /// Keeps the existing name and enabled flag. If there was no private
    /// vocabulary, one named [`PRIVATE_VOCABULARY_NAME`] is created, enabled.
    pub fn set_private_words<I, W>(&mut self, words: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let (name, enabled) = match &self.private {
            Some(slot) => (slot.vocabulary.name().to_string(), slot.enabled),
            None => (PRIVATE_VOCABULARY_NAME.to_string(), true),
        };
        self.private = Some(Slot {
            vocabulary: Arc::new(Vocabulary::new(name, words)),
            enabled,
        });
        self.generation += 1;
    }

    /// Enable or disable the private vocabulary
    ///
    /// A no-op when there is no private vocabulary.
    pub fn set_private_enabled(&mut self, enabled: bool) {
        if let Some(slot) = &mut self.private {
            slot.enabled = enabled;
        }
    }

    /// Index of the selected main vocabulary
    pub fn main_index(&self) -> usize {
        self.main_index
    }

    /// Available main vocabularies
    pub fn main_vocabularies(&self) -> impl Iterator<Item = &Vocabulary> + '_ {
        self.main.iter().map(|v| v.as_ref())
    }

    /// Available auxiliary vocabularies with their enabled flags
    pub fn auxiliary_vocabularies(&self) -> impl Iterator<Item = (&Vocabulary, bool)> + '_ {
        self.auxiliary
            .iter()
            .map(|slot| (slot.vocabulary.as_ref(), slot.enabled))
    }

    /// The private vocabulary, if any
    pub fn private_vocabulary(&self) -> Option<&Vocabulary> {
        self.private.as_ref().map(|slot| slot.vocabulary.as_ref())
    }

    /// Vocabularies in use, in merge order
    pub fn selected(&self) -> Vec<&Vocabulary> {
        let mut selected: Vec<&Vocabulary> = Vec::with_capacity(self.auxiliary.len() + 2);
        if let Some(main) = self.main.get(self.main_index) {
            selected.push(main);
        }
        selected.extend(
            self.auxiliary
                .iter()
                .filter(|slot| slot.enabled)
                .map(|slot| slot.vocabulary.as_ref()),
        );
        if let Some(slot) = self.private.as_ref().filter(|slot| slot.enabled) {
            selected.push(&slot.vocabulary);
        }
        selected
    }

    /// Display name of the combination, e.g. `"Common + Names"`
    pub fn combined_name(&self) -> String {
        self.selected()
            .iter()
            .map(|v| v.name())
            .collect::<Vec<_>>()
            .join(anagram_core::vocabulary::NAME_SEPARATOR)
    }

    /// Merge the vocabularies in use, dropping `exclusions`
    pub fn merged<S: AsRef<str>>(&self, exclusions: &[S]) -> Vocabulary {
        merge(exclusions, self.selected())
    }

    /// Identity of the current combination
    pub fn key(&self) -> VocabularyKey {
        VocabularyKey {
            main: self.main_index,
            auxiliary: self
                .auxiliary
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.enabled)
                .map(|(index, _)| index)
                .collect(),
            private: self.private.as_ref().is_some_and(|slot| slot.enabled),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> VocabularySelection {
        VocabularySelection::new(vec![
            Vocabulary::new("Common", ["death", "pneumatic"]),
            Vocabulary::new("Full", ["death", "hated", "pneumatic"]),
        ])
        .with_auxiliary(vec![
            Vocabulary::new("Names", ["mitch", "patenaude"]),
            Vocabulary::new("Places", ["utah"]).with_enabled(false),
        ])
    }

    #[test]
    fn test_defaults_to_first_main() {
        let sel = selection();
        assert_eq!(sel.main_index(), 0);
        assert_eq!(sel.combined_name(), "Common + Names");
    }

    #[test]
    fn test_select_main() {
        let mut sel = selection();
        sel.select_main(1).unwrap();
        assert_eq!(sel.combined_name(), "Full + Names");
        assert_eq!(sel.key().main, 1);
    }

    #[test]
    fn test_select_main_out_of_range() {
        let mut sel = selection();
        let err = sel.select_main(5).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownVocabulary {
                kind: VocabularyKind::Main,
                index: 5
            }
        ));
        assert_eq!(sel.main_index(), 0);
    }

    #[test]
    fn test_toggle_auxiliary() {
        let mut sel = selection();
        sel.set_auxiliary_enabled(0, false).unwrap();
        sel.set_auxiliary_enabled(1, true).unwrap();
        assert_eq!(sel.combined_name(), "Common + Places");
        assert_eq!(sel.key().auxiliary, vec![1]);

        assert!(sel.set_auxiliary_enabled(2, true).is_err());
    }

    #[test]
    fn test_private_vocabulary() {
        let mut sel = selection();
        assert!(sel.private_vocabulary().is_none());
        let before = sel.key();

        sel.set_private_words(["hated"]);
        assert_eq!(sel.combined_name(), "Common + Names + Private");
        let after = sel.key();
        assert!(after.private);
        assert_ne!(before, after);

        sel.set_private_enabled(false);
        assert_eq!(sel.combined_name(), "Common + Names");
        assert!(!sel.key().private);
    }

    #[test]
    fn test_replacing_private_words_changes_key() {
        let mut sel = selection();
        sel.set_private_words(["one"]);
        let first = sel.key();
        sel.set_private_words(["one"]);
        assert_ne!(first, sel.key());
    }

    #[test]
    fn test_private_keeps_name_and_flag() {
        let mut sel = selection().with_private(Vocabulary::new("Mine", ["x"]).with_enabled(false));
        sel.set_private_words(["y", "z"]);

        let private = sel.private_vocabulary().unwrap();
        assert_eq!(private.name(), "Mine");
        assert_eq!(private.words(), ["y", "z"]);
        assert!(!sel.key().private);
    }

    #[test]
    fn test_merged_dedups_and_excludes() {
        let mut sel = selection();
        sel.select_main(1).unwrap();
        sel.set_private_words(["death", "tuna"]);

        let merged = sel.merged(&["hated"]);
        assert_eq!(merged.name(), "Full + Names + Private");
        assert_eq!(
            merged.words(),
            ["death", "pneumatic", "mitch", "patenaude", "tuna"]
        );
    }

    #[test]
    fn test_empty_selection() {
        let sel = VocabularySelection::default();
        assert!(sel.selected().is_empty());
        assert_eq!(sel.combined_name(), "");
        let no_exclusions: [&str; 0] = [];
        assert!(sel.merged(&no_exclusions).is_empty());
    }
}
