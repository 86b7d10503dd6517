//! Error types for the anagram engine
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Only a handful of conditions are errors at all. Exhaustion, fetch
//! contention and include phrases that do not fit are reported through
//! ordinary return values.

use std::io;
use thiserror::Error;

/// Result type alias for anagram operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which family of vocabularies a selection refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyKind {
    /// One of the mutually exclusive main vocabularies
    Main,
    /// An optional auxiliary vocabulary layered on top of the main one
    Auxiliary,
}

impl std::fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabularyKind::Main => write!(f, "main"),
            VocabularyKind::Auxiliary => write!(f, "auxiliary"),
        }
    }
}

/// Error types for the anagram engine
#[derive(Debug, Error)]
pub enum Error {
    /// Multiset subtraction where the operand is not a subset
    ///
    /// Inside the search engine this is an invariant violation: candidates are
    /// always filtered against the remaining letters before subtracting.
    #[error("Not a superset: letter {letter:?} has {available}, cannot remove {requested}")]
    NotSuperset {
        /// Offending letter
        letter: char,
        /// Count present in the minuend
        available: usize,
        /// Count requested by the subtrahend
        requested: usize,
    },

    /// Vocabulary selection refers to an index that does not exist
    #[error("Unknown {kind} vocabulary at index {index}")]
    UnknownVocabulary {
        /// Main or auxiliary
        kind: VocabularyKind,
        /// Requested index
        index: usize,
    },

    /// Configuration value failed to parse or validate
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error (reading or writing a config file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
