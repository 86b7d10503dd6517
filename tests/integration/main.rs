//! End-to-end tests through the top-level `anagrams` API.

#[path = "../common/mod.rs"]
mod common;

mod config_file;
mod properties;
mod scenarios;
