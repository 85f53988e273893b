use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::config::TokenizerConfig;

// Words are alphabetic runs, optionally joined by apostrophes or hyphens
// ("don't", "tag-cloud"). Digits and punctuation split words.
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Alphabetic}+(?:['\-]\p{Alphabetic}+)*").unwrap());

/// Count word occurrences in `text`.
///
/// Returns `(word, frequency)` pairs ordered by first appearance, so the
/// downstream weight sort has a stable tie-break to fall back on.
pub fn count_words(text: &str, config: &TokenizerConfig) -> Vec<(String, u32)> {
    let stop_words: HashSet<&str> = config.stop_words.iter().map(String::as_str).collect();

    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for found in WORD_RE.find_iter(text) {
        let word = if config.lowercase {
            found.as_str().to_lowercase()
        } else {
            found.as_str().to_string()
        };
        if word.chars().count() < config.min_word_len {
            continue;
        }
        if stop_words.contains(word.as_str()) {
            continue;
        }
        match counts.get_mut(&word) {
            Some(count) => *count += 1,
            None => {
                counts.insert(word.clone(), 1);
                order.push(word);
            }
        }
    }

    order
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            (word, count)
        })
        .collect()
}
