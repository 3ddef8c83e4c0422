//! Main analysis API.
//!
//! The entry point is the [`Analyzer`] struct, along with the [`analyze`]
//! convenience function. One call runs the whole pipeline: normalize the
//! markup, compute every statistic group, evaluate the rule catalogue and
//! aggregate the findings into a single score.
//!
//! # Example
//!
//! ```rust
//! use lexiscore_core::{KeywordSet, MetaFields, analyze};
//!
//! let html = "<h1>Rust ownership</h1><p>Rust ownership rules keep memory safe.</p>";
//! let meta = MetaFields::new("Understanding Rust ownership in practice", "");
//! let analysis = analyze(html, &KeywordSet::new("ownership"), &meta, None);
//!
//! assert_eq!(analysis.stats.length.words, 8);
//! assert!(analysis.score.value <= 100);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::finding::{Category, Finding};
use crate::keywords::{KeywordSet, compute_density};
use crate::metadata::MetaFields;
use crate::normalize::{NormalizedContent, normalize};
use crate::parse::Document;
use crate::readability::score_readability;
use crate::rules::{RuleContext, evaluate};
use crate::scoring::{AggregateScore, aggregate};
use crate::statistics::{ContentStatistics, DEFAULT_WORDS_PER_MINUTE, extract_length_with_speed, split_words};
use crate::structure::{Outline, analyze_document, outline_document};
use crate::{LexiscoreError, Result};

/// Configuration for the [`Analyzer`].
///
/// # Example
///
/// ```rust
/// use lexiscore_core::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .base_domain("example.com")
///     .words_per_minute(250.0)
///     .build();
/// assert_eq!(config.base_domain.as_deref(), Some("example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Domain links are classified against (default: none, every link is internal).
    pub base_domain: Option<String>,

    /// Reading speed for the reading time estimate (default: 200).
    pub words_per_minute: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { base_domain: None, words_per_minute: DEFAULT_WORDS_PER_MINUTE }
    }
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

/// Builder for AnalyzerConfig.
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Sets the base domain. Blank values clear it.
    pub fn base_domain(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.config.base_domain = if value.trim().is_empty() { None } else { Some(value) };
        self
    }

    /// Sets the reading speed in words per minute.
    pub fn words_per_minute(mut self, value: f64) -> Self {
        self.config.words_per_minute = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub stats: ContentStatistics,
    /// Findings in display order.
    pub findings: Vec<Finding>,
    pub score: AggregateScore,
}

impl Analysis {
    /// Looks a finding up by id.
    pub fn finding(&self, id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.id == id)
    }

    /// Findings of one category, in display order.
    pub fn findings_in(&self, category: Category) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }

    /// Converts the analysis to a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| LexiscoreError::Serialization(e.to_string()))
    }
}

/// Everything computed before the rules run.
#[derive(Debug, Clone)]
pub(crate) struct Prepared {
    pub content: NormalizedContent,
    pub outline: Outline,
    pub stats: ContentStatistics,
}

/// Content analyzer.
///
/// Holds only configuration; every call to [`Analyzer::analyze`] is
/// independent and deterministic, so one analyzer can be shared freely.
///
/// # Example
///
/// ```rust
/// use lexiscore_core::{Analyzer, AnalyzerConfig, KeywordSet, MetaFields};
///
/// let analyzer = Analyzer::with_config(AnalyzerConfig::builder().base_domain("example.com").build());
/// let html = r#"<p>See <a href="https://rust-lang.org">the docs</a>.</p>"#;
/// let analysis = analyzer.analyze(html, &KeywordSet::default(), &MetaFields::default());
/// assert_eq!(analysis.stats.structure.links.external, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Creates an analyzer with default settings.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Creates an analyzer with a custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes content against keywords and meta fields.
    ///
    /// Never fails; empty content yields zeroed statistics, a `content-empty`
    /// finding and a score of 0.
    pub fn analyze(&self, content: &str, keywords: &KeywordSet, meta: &MetaFields) -> Analysis {
        let prepared = self.prepare(content, keywords);

        let ctx = RuleContext {
            plain_text: &prepared.content.plain_text,
            outline: &prepared.outline,
            keywords,
            meta,
            stats: &prepared.stats,
        };
        let findings = evaluate(&ctx);
        let score = aggregate(&findings);

        debug!(
            words = prepared.stats.length.words,
            findings = findings.len(),
            score = score.value,
            label = %score.label,
            "analysis complete"
        );

        Analysis { stats: prepared.stats, findings, score }
    }

    /// Computes the statistics snapshot without evaluating rules.
    pub fn statistics(&self, content: &str, keywords: &KeywordSet) -> ContentStatistics {
        self.prepare(content, keywords).stats
    }

    pub(crate) fn prepare(&self, content: &str, keywords: &KeywordSet) -> Prepared {
        let normalized = normalize(content);
        let doc = Document::parse(&normalized.raw_markup);

        let length = extract_length_with_speed(
            &normalized.plain_text,
            &normalized.raw_markup,
            self.config.words_per_minute,
        );
        let words = split_words(&normalized.plain_text);
        let readability = score_readability(&words, length.sentences);
        let keyword_density = compute_density(&normalized.plain_text, keywords);
        let structure = analyze_document(&doc, self.config.base_domain.as_deref(), keywords.main_term());
        let outline = outline_document(&doc, &normalized.raw_markup);

        debug!(
            words = length.words,
            sentences = length.sentences,
            paragraphs = length.paragraphs,
            h1 = structure.headings.h1,
            images = structure.media.image_count,
            "statistics extracted"
        );

        Prepared {
            content: normalized,
            outline,
            stats: ContentStatistics { length, readability, keyword_density, structure },
        }
    }
}

/// Analyzes content with default settings and an optional base domain.
pub fn analyze(content: &str, keywords: &KeywordSet, meta: &MetaFields, base_domain: Option<&str>) -> Analysis {
    let mut builder = AnalyzerConfig::builder();
    if let Some(domain) = base_domain {
        builder = builder.base_domain(domain);
    }
    Analyzer::with_config(builder.build()).analyze(content, keywords, meta)
}

/// Keywords, meta fields and base domain bundled as one document.
///
/// This is the shape accepted by the CLI's `--request` option:
///
/// ```json
/// {
///   "keywords": { "main": "rust", "secondary": ["cargo"], "long_tail": [] },
///   "meta": { "title": "…", "description": "…" },
///   "base_domain": "example.com"
/// }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    pub keywords: KeywordSet,
    pub meta: MetaFields,
    pub base_domain: Option<String>,
}

impl AnalysisRequest {
    /// Decodes a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LexiscoreError::InvalidRequest`] if the document is not valid
    /// JSON or does not have the expected shape.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LexiscoreError::InvalidRequest(e.to_string()))
    }

    /// Runs the request against `content` with default settings.
    pub fn analyze(&self, content: &str) -> Analysis {
        analyze(content, &self.keywords, &self.meta, self.base_domain.as_deref())
    }
}
