//! Core types for the anagram engine
//!
//! This crate defines the foundational types used throughout the system:
//! - LetterMultiset: case/space-insensitive character counts of a phrase
//! - Phrase helpers: normalization for self-comparison, word splitting
//! - Vocabulary: named word lists and the exclusion-aware merge
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod letters;
pub mod phrase;
pub mod vocabulary;

// Re-export commonly used types
pub use error::{Error, Result, VocabularyKind};
pub use letters::LetterMultiset;
pub use phrase::{normalize_phrase, phrase_words};
pub use vocabulary::{merge, Vocabulary};
