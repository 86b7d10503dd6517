//! Tuning loaded from `anagrams.toml`.

use crate::common::*;
use anagrams::{ResultCache, ResultCacheConfig, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn test_cache_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "capacity = 2\ninitial_fetch = 0\n").unwrap();

    let config = ResultCacheConfig::from_file(&path).unwrap();
    let cache = ResultCache::new(common_selection(), config).unwrap();
    assert_eq!(cache.config().capacity, 2);

    cache.set_input("Mitch Patenaude");
    cache.wait_for_fetch();
    assert!(cache.is_empty());

    cache.set_input("Hated Death");
    cache.set_input("Quixotic");
    assert_eq!(cache.cached_configurations(), 2);
}

#[test]
fn test_default_file_gives_default_cache() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    ResultCacheConfig::write_default_if_missing(&path).unwrap();

    let config = ResultCacheConfig::from_file(&path).unwrap();
    assert_eq!(config, ResultCacheConfig::default());
}

#[test]
fn test_invalid_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "progress_interval = 0\n").unwrap();

    assert!(matches!(
        ResultCacheConfig::from_file(&path),
        Err(anagrams::Error::InvalidConfig(_))
    ));
}
