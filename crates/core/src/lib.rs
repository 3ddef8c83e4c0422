pub mod analysis;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod finding;
pub mod formatters;
pub mod keywords;
pub mod metadata;
pub mod normalize;
pub mod parse;
pub mod readability;
pub mod rules;
pub mod scoring;
pub mod statistics;
pub mod structure;

pub use analysis::{Analysis, AnalysisRequest, Analyzer, AnalyzerConfig, AnalyzerConfigBuilder, analyze};
pub use error::{LexiscoreError, Result};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, fetch_file, fetch_stdin, fetch_url, url_host};
pub use finding::{Category, Finding, Priority, Status, sort_findings};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter};
pub use formatters::{convert_to_json, convert_to_text, stats_to_json};
pub use keywords::{KeywordDensityStats, KeywordSet, compute_density, contains_term};
pub use metadata::{MetaFields, extract_meta_fields};
pub use normalize::{NormalizedContent, normalize};
pub use parse::Document;
pub use readability::{ReadabilityStats, count_syllables, score_readability};
#[doc(hidden)]
pub use rules::{Check, Rule, RuleContext, Verdict};
pub use rules::{RULES, evaluate, evaluate_rules};
pub use scoring::{AggregateScore, ScoreColor, aggregate};
pub use statistics::{ContentStatistics, LengthStats, extract_length, extract_length_with_speed};
pub use structure::{
    HeadingCounts, LinkKind, LinkStats, MediaStats, Outline, StructureStats, analyze_structure, classify_link,
};
