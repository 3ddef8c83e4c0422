//! Readability estimation.
//!
//! Syllables are estimated with a fixed orthographic heuristic (vowel runs plus
//! suffix penalties) rather than a dictionary, and fed into the Flesch reading
//! ease formula:
//!
//! ```text
//! 206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)
//! ```
//!
//! The raw formula value is kept as-is in [`ReadabilityStats::flesch_score`]; it
//! can leave the 0–100 range on very short or very dense text. Consumers that
//! need a bounded value use [`ReadabilityStats::clamped_flesch`].

use serde::{Deserialize, Serialize};

/// Words at or above this many characters count as complex.
pub const COMPLEX_WORD_MIN_CHARS: usize = 8;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Readability metrics for one piece of content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadabilityStats {
    /// Unclamped Flesch reading ease; 0 when there are no words or no sentences.
    pub flesch_score: f64,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Characters per word.
    pub avg_word_length: f64,
    /// Words with at least [`COMPLEX_WORD_MIN_CHARS`] characters.
    pub complex_word_count: usize,
    /// Complex words as a percentage of all words.
    pub complex_word_percentage: f64,
    /// Estimated syllables across all words.
    pub syllables: usize,
}

impl ReadabilityStats {
    /// Flesch score bounded to 0–100, for display and scoring rules.
    pub fn clamped_flesch(&self) -> f64 {
        self.flesch_score.clamp(0.0, 100.0)
    }
}

/// Estimates the syllables in a single word.
///
/// Surrounding punctuation is ignored. The rules, applied in order:
/// 1. words of three characters or fewer have one syllable;
/// 2. every maximal run of `a e i o u y` counts one;
/// 3. a trailing `e`, a trailing `es` and a trailing `ent` each remove one
///    (independently, so a word can lose up to three);
/// 4. every run of two or more vowels removes one more;
/// 5. the result is at least one.
///
/// # Example
///
/// ```rust
/// use lexiscore_core::count_syllables;
///
/// assert_eq!(count_syllables("cat"), 1);
/// assert_eq!(count_syllables("programming"), 3);
/// assert_eq!(count_syllables("beautiful,"), 2);
/// ```
pub fn count_syllables(word: &str) -> usize {
    let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
    if word.chars().count() <= 3 {
        return 1;
    }

    let mut runs = 0i64;
    let mut long_runs = 0i64;
    let mut current = 0usize;
    for c in word.chars() {
        if VOWELS.contains(&c) {
            current += 1;
            continue;
        }
        if current > 0 {
            runs += 1;
            long_runs += i64::from(current > 1);
        }
        current = 0;
    }
    if current > 0 {
        runs += 1;
        long_runs += i64::from(current > 1);
    }

    let mut count = runs;
    if word.ends_with('e') {
        count -= 1;
    }
    if word.ends_with("es") {
        count -= 1;
    }
    if word.ends_with("ent") {
        count -= 1;
    }
    count -= long_runs;

    count.max(1) as usize
}

/// Computes readability metrics from the word list and sentence count.
///
/// Every ratio is defined as 0 when its denominator is 0.
pub fn score_readability(words: &[&str], sentence_count: usize) -> ReadabilityStats {
    let word_count = words.len();
    if word_count == 0 {
        return ReadabilityStats::default();
    }

    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let complex_word_count = words
        .iter()
        .filter(|w| w.chars().count() >= COMPLEX_WORD_MIN_CHARS)
        .count();

    let words_f = word_count as f64;
    let (flesch_score, avg_sentence_length) = if sentence_count > 0 {
        let per_sentence = words_f / sentence_count as f64;
        let per_word = syllables as f64 / words_f;
        (206.835 - 1.015 * per_sentence - 84.6 * per_word, per_sentence)
    } else {
        (0.0, 0.0)
    };

    ReadabilityStats {
        flesch_score,
        avg_sentence_length,
        avg_word_length: total_chars as f64 / words_f,
        complex_word_count,
        complex_word_percentage: complex_word_count as f64 / words_f * 100.0,
        syllables,
    }
}
