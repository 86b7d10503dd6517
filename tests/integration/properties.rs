//! Property tests over generated inputs.

use crate::common::*;
use anagrams::{normalize_phrase, search, LetterMultiset, ResultCacheConfig};
use proptest::prelude::*;

const SAMPLE: usize = 60;

fn soup_words() -> Vec<String> {
    word_soup().words().to_vec()
}

/// Inputs that are known to have at least one anagram: a few soup words.
fn soup_phrase() -> impl Strategy<Value = String> {
    prop::sample::subsequence(soup_words(), 1..4).prop_map(|words| words.join(" "))
}

fn first_n(cache: &anagrams::ResultCache, n: usize) -> Vec<String> {
    (0..n).map_while(|i| cache.get_at(i)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn cached_results_are_letter_exact(input in soup_phrase()) {
        let cache = create_cache_over(word_soup(), ResultCacheConfig::default());
        cache.set_input(input.clone());

        let target = LetterMultiset::from_text(&input);
        for phrase in first_n(&cache, SAMPLE) {
            prop_assert_eq!(LetterMultiset::from_text(&phrase), target.clone());
        }
    }

    #[test]
    fn cached_results_never_restate_input(input in soup_phrase()) {
        let cache = create_cache_over(word_soup(), ResultCacheConfig::default());
        cache.set_input(input.clone());

        let signature = normalize_phrase(&input);
        for phrase in first_n(&cache, SAMPLE) {
            prop_assert_ne!(normalize_phrase(&phrase), signature.clone());
        }
    }

    #[test]
    fn cache_is_search_minus_input(input in soup_phrase()) {
        let cache = create_cache_over(word_soup(), ResultCacheConfig {
            fetch_margin: 3,
            initial_fetch: 0,
            ..ResultCacheConfig::default()
        });
        cache.set_input(input.clone());

        let signature = normalize_phrase(&input);
        let no_includes: [&str; 0] = [];
        let expected: Vec<String> = search(&input, &no_includes, &soup_words())
            .filter(|phrase| normalize_phrase(phrase) != signature)
            .take(SAMPLE)
            .collect();

        prop_assert_eq!(first_n(&cache, SAMPLE), expected);
    }

    #[test]
    fn switching_away_and_back_is_stable(input in soup_phrase(), other in soup_phrase()) {
        let cache = create_cache_over(word_soup(), ResultCacheConfig::default());
        cache.set_input(input.clone());
        let before = first_n(&cache, 20);

        cache.set_input(other);
        cache.set_input(input);
        prop_assert_eq!(first_n(&cache, 20), before);
    }
}
