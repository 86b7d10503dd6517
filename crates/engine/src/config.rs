//! Result cache configuration via `anagrams.toml`
//!
//! Every knob has a default, so an empty file (or no file at all) yields the
//! stock behaviour. Values are validated eagerly on load.

use anagram_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "anagrams.toml";

/// Tuning for [`crate::ResultCache`]
///
/// # Example
///
/// ```toml
/// # Configurations kept for instant reactivation
/// capacity = 25
///
/// # Extra results fetched beyond a requested index
/// fetch_margin = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultCacheConfig {
    /// Maximum number of configurations kept in the LRU.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// How far past a requested index `get_at` fetches ahead.
    #[serde(default = "default_fetch_margin")]
    pub fetch_margin: usize,
    /// Results fetched automatically whenever a configuration becomes active.
    /// Zero disables the automatic fetch.
    #[serde(default = "default_initial_fetch")]
    pub initial_fetch: usize,
    /// Number of appended results between progress callbacks.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

fn default_capacity() -> usize {
    25
}

fn default_fetch_margin() -> usize {
    10
}

fn default_initial_fetch() -> usize {
    100
}

fn default_progress_interval() -> usize {
    10
}

impl Default for ResultCacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            fetch_margin: default_fetch_margin(),
            initial_fetch: default_initial_fetch(),
            progress_interval: default_progress_interval(),
        }
    }
}

impl ResultCacheConfig {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `capacity`, `fetch_margin` or
    /// `progress_interval` is zero.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("capacity", self.capacity),
            ("fetch_margin", self.fetch_margin),
            ("progress_interval", self.progress_interval),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be non-zero", name)));
            }
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Anagram result cache configuration
#
# Number of configurations (input x inclusions x exclusions x vocabulary)
# kept so that switching back to one of them is instant.
capacity = 25

# When a result within this distance of the end of the buffer is requested,
# fetch this many more in the background.
fetch_margin = 10

# Results fetched as soon as a configuration becomes active (0 = none).
initial_fetch = 100

# Report progress every this many results.
progress_interval = 10
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ResultCacheConfig = toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidConfig(msg) => {
                Error::InvalidConfig(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
