//! Target keywords and keyword density.
//!
//! Three tiers of keywords are tracked. The main keyword and each secondary
//! keyword are matched case-insensitively on word boundaries; long-tail phrases
//! are matched as case-insensitive substrings, since they may straddle
//! punctuation. Density is always occurrences per total word count, in percent.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::statistics::split_words;

/// The keywords a piece of content is evaluated against.
///
/// Blank entries are treated as absent. Size limits (one main keyword, a
/// handful of secondary and long-tail entries) belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSet {
    pub main: Option<String>,
    pub secondary: Vec<String>,
    pub long_tail: Vec<String>,
}

impl KeywordSet {
    /// Creates a set with only a main keyword.
    pub fn new(main: impl Into<String>) -> Self {
        Self { main: Some(main.into()), ..Default::default() }
    }

    /// Adds secondary keywords.
    pub fn with_secondary<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Adds long-tail phrases.
    pub fn with_long_tail<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.long_tail.extend(phrases.into_iter().map(Into::into));
        self
    }

    /// The trimmed main keyword, if one is set and non-blank.
    pub fn main_term(&self) -> Option<&str> {
        self.main.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Trimmed, non-blank secondary keywords in the order given.
    pub fn secondary_terms(&self) -> impl Iterator<Item = &str> {
        filled(&self.secondary)
    }

    /// Trimmed, non-blank long-tail phrases in the order given.
    pub fn long_tail_phrases(&self) -> impl Iterator<Item = &str> {
        filled(&self.long_tail)
    }
}

fn filled(terms: &[String]) -> impl Iterator<Item = &str> {
    terms.iter().map(|t| t.trim()).filter(|t| !t.is_empty())
}

/// Keyword densities in percent of total words.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeywordDensityStats {
    pub main: f64,
    pub secondary: BTreeMap<String, f64>,
    pub long_tail: BTreeMap<String, f64>,
}

impl KeywordDensityStats {
    /// Density recorded for a secondary keyword, 0 when unknown.
    pub fn secondary_density(&self, term: &str) -> f64 {
        self.secondary.get(term.trim()).copied().unwrap_or(0.0)
    }
}

/// Counts whole-word, case-insensitive occurrences of `term`.
///
/// The term is escaped before it is compiled, so regex syntax in user input is
/// matched literally. A word boundary is only required on a side where the
/// term ends in a word character, so terms like `C++` or `.NET` still match.
pub fn count_word_matches(text: &str, term: &str) -> usize {
    let term = term.trim();
    if term.is_empty() {
        return 0;
    }
    Regex::new(&word_pattern(term)).map(|re| re.find_iter(text).count()).unwrap_or(0)
}

fn word_pattern(term: &str) -> String {
    let boundary = |edge: Option<char>| {
        if edge.is_some_and(|c| c.is_alphanumeric() || c == '_') { r"\b" } else { "" }
    };
    format!(
        "(?i){}{}{}",
        boundary(term.chars().next()),
        regex::escape(term),
        boundary(term.chars().next_back())
    )
}

/// Counts case-insensitive, non-overlapping substring occurrences of `phrase`.
pub fn count_phrase_matches(text: &str, phrase: &str) -> usize {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return 0;
    }
    Regex::new(&format!("(?i){}", regex::escape(phrase)))
        .map(|re| re.find_iter(text).count())
        .unwrap_or(0)
}

/// True when `term` appears in `text` as a whole word, ignoring case.
pub fn contains_term(text: &str, term: &str) -> bool {
    count_word_matches(text, term) > 0
}

fn density(occurrences: usize, total_words: usize) -> f64 {
    if total_words == 0 { 0.0 } else { occurrences as f64 / total_words as f64 * 100.0 }
}

/// Computes density for every keyword tier.
///
/// # Example
///
/// ```rust
/// use lexiscore_core::{KeywordSet, compute_density};
///
/// let keywords = KeywordSet::new("rust").with_long_tail(["borrow checker"]);
/// let stats = compute_density("Rust has a borrow checker. rustacean rust.", &keywords);
/// assert!((stats.main - 100.0 * 2.0 / 7.0).abs() < 1e-9);
/// assert!(stats.long_tail["borrow checker"] > 0.0);
/// ```
pub fn compute_density(plain_text: &str, keywords: &KeywordSet) -> KeywordDensityStats {
    let total_words = split_words(plain_text).len();

    let main = keywords
        .main_term()
        .map(|term| density(count_word_matches(plain_text, term), total_words))
        .unwrap_or(0.0);

    let secondary = keywords
        .secondary_terms()
        .map(|term| (term.to_string(), density(count_word_matches(plain_text, term), total_words)))
        .collect();

    let long_tail = keywords
        .long_tail_phrases()
        .map(|phrase| (phrase.to_string(), density(count_phrase_matches(plain_text, phrase), total_words)))
        .collect();

    KeywordDensityStats { main, secondary, long_tail }
}
