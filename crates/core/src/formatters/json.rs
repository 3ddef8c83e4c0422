use crate::analysis::Analysis;
use crate::finding::Finding;
use crate::scoring::AggregateScore;
use crate::statistics::ContentStatistics;
use crate::{LexiscoreError, Result};
use serde::Serialize;

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Aggregate score
    pub score: &'a AggregateScore,
    /// Findings in display order
    pub findings: &'a [Finding],
    /// Full statistics snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<&'a ContentStatistics>,
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Include the statistics snapshot
    pub include_stats: bool,
    /// Pretty print JSON output
    pub pretty: bool,
}

fn to_string<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let result = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    result.map_err(|e| LexiscoreError::Serialization(e.to_string()))
}

/// Convert an analysis to JSON
pub fn convert_to_json(analysis: &Analysis, config: &JsonConfig) -> Result<String> {
    let output = JsonOutput {
        score: &analysis.score,
        findings: &analysis.findings,
        stats: config.include_stats.then_some(&analysis.stats),
    };
    to_string(&output, config.pretty)
}

/// Convert only the statistics snapshot to JSON
pub fn stats_to_json(stats: &ContentStatistics, pretty: bool) -> Result<String> {
    to_string(stats, pretty)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, analysis: &Analysis) -> Result<String> {
        convert_to_json(analysis, &self.config)
    }

    pub fn stats_only(&self, analysis: &Analysis) -> Result<String> {
        stats_to_json(&analysis.stats, self.config.pretty)
    }
}
