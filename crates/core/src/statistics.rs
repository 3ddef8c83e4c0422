//! Length statistics and the combined statistics snapshot.
//!
//! [`extract_length`] measures the plain text produced by the normalizer;
//! [`ContentStatistics`] bundles its output with the readability, keyword
//! density and structure groups computed by the sibling modules.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::keywords::KeywordDensityStats;
use crate::normalize::text_blocks;
use crate::readability::ReadabilityStats;
use crate::structure::StructureStats;

/// Default reading speed used for [`LengthStats::reading_time_minutes`].
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 200.0;

static PARAGRAPH_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p(?:\s[^>]*)?/?>").expect("valid paragraph pattern"));
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence pattern"));

/// Immutable snapshot of every statistic computed for one piece of content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentStatistics {
    pub length: LengthStats,
    pub readability: ReadabilityStats,
    pub keyword_density: KeywordDensityStats,
    pub structure: StructureStats,
}

/// Length, paragraph and sentence metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LengthStats {
    /// Whitespace-separated tokens in the plain text.
    pub words: usize,
    /// Characters in the plain text, spaces included.
    pub characters: usize,
    /// Characters in the plain text, whitespace excluded.
    pub characters_no_spaces: usize,
    /// `<p>` opening tags, or blank-line separated blocks when the markup has none.
    pub paragraphs: usize,
    /// Non-empty fragments between runs of `.`, `!` and `?`.
    pub sentences: usize,
    /// Words divided by reading speed, not rounded.
    pub reading_time_minutes: f64,
}

/// Splits plain text into words.
pub fn split_words(plain_text: &str) -> Vec<&str> {
    plain_text.split_whitespace().collect()
}

/// Counts sentences in plain text.
pub fn count_sentences(plain_text: &str) -> usize {
    SENTENCE_END
        .split(plain_text)
        .filter(|fragment| !fragment.trim().is_empty())
        .count()
}

/// Counts paragraphs, preferring `<p>` tags in the markup.
pub fn count_paragraphs(raw_markup: &str) -> usize {
    let tagged = PARAGRAPH_OPEN.find_iter(raw_markup).count();
    if tagged > 0 {
        return tagged;
    }

    text_blocks(raw_markup).len()
}

/// Extracts length statistics at the default reading speed.
///
/// # Example
///
/// ```rust
/// use lexiscore_core::{extract_length, normalize};
///
/// let content = normalize("<p>One sentence here. Another one!</p><p>Third?</p>");
/// let stats = extract_length(&content.plain_text, &content.raw_markup);
/// assert_eq!(stats.words, 6);
/// assert_eq!(stats.paragraphs, 2);
/// assert_eq!(stats.sentences, 3);
/// ```
pub fn extract_length(plain_text: &str, raw_markup: &str) -> LengthStats {
    extract_length_with_speed(plain_text, raw_markup, DEFAULT_WORDS_PER_MINUTE)
}

/// Extracts length statistics with a custom reading speed.
///
/// A non-positive speed yields a reading time of 0.
pub fn extract_length_with_speed(plain_text: &str, raw_markup: &str, words_per_minute: f64) -> LengthStats {
    let words = split_words(plain_text).len();
    let reading_time_minutes = if words_per_minute > 0.0 { words as f64 / words_per_minute } else { 0.0 };

    LengthStats {
        words,
        characters: plain_text.chars().count(),
        characters_no_spaces: plain_text.chars().filter(|c| !c.is_whitespace()).count(),
        paragraphs: count_paragraphs(raw_markup),
        sentences: count_sentences(plain_text),
        reading_time_minutes,
    }
}
