//! Anagram phrase search
//!
//! This crate provides:
//! - DictionaryEntry / AnnotatedDictionary: words paired with letter signatures
//! - search_order: longest-first, lexicographically-last-first candidate order
//! - search / AnagramSearch: lazy backtracking enumeration of anagram phrases
//!
//! # Usage
//!
//! ```
//! use anagram_search::search;
//!
//! let vocabulary = ["eat", "tea", "ate"];
//! let no_includes: [&str; 0] = [];
//! let first = search("Tea", &no_includes, &vocabulary).next();
//! assert_eq!(first.as_deref(), Some("tea"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod anagram;
pub mod dictionary;

// Re-export commonly used types
pub use anagram::{search, AnagramSearch};
pub use dictionary::{search_order, AnnotatedDictionary, DictionaryEntry};

// Core types that appear in this crate's API
pub use anagram_core::LetterMultiset;
