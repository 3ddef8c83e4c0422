//! Evaluation findings and their display order.
//!
//! A [`Finding`] is the outcome of one rule. Findings are created fresh on
//! every analysis run and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How well a check passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Improvement,
    Problem,
}

impl Status {
    /// Sort rank: problems first.
    pub fn rank(self) -> u8 {
        match self {
            Status::Problem => 0,
            Status::Improvement => 1,
            Status::Good => 2,
        }
    }

    /// The less favourable of two statuses.
    pub fn worst(self, other: Status) -> Status {
        if other.rank() < self.rank() { other } else { self }
    }

    /// Default score for a status in banded rules.
    pub fn default_score(self) -> u8 {
        match self {
            Status::Good => 10,
            Status::Improvement => 5,
            Status::Problem => 0,
        }
    }
}

/// How urgently a finding should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Multiplier used by the score aggregator.
    pub fn weight(self) -> u32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// Which aspect of the content a finding is about.
///
/// Declaration order is the display order of category groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Keywords,
    Structure,
    Readability,
    Meta,
    Links,
    Images,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Keywords,
        Category::Structure,
        Category::Readability,
        Category::Meta,
        Category::Links,
        Category::Images,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Keywords => "Keywords",
            Category::Structure => "Structure",
            Category::Readability => "Readability",
            Category::Meta => "Meta tags",
            Category::Links => "Links",
            Category::Images => "Media",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Good => "good",
            Status::Improvement => "improvement",
            Status::Problem => "problem",
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

/// One discrete evaluation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable, rule-specific identifier (e.g. `h1-count`).
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    /// 0–10.
    pub score: u8,
    pub priority: Priority,
    pub category: Category,
    pub suggestions: Vec<String>,
}

impl Finding {
    /// Composite display key: category, then priority, then status.
    pub fn sort_key(&self) -> (Category, u8, u8) {
        (self.category, self.priority.rank(), self.status.rank())
    }
}

/// Sorts findings into display order.
///
/// Findings are grouped by category, and within a group the most actionable
/// come first: high before low priority, problems before improvements before
/// good results. The sort is stable, so equal keys keep evaluation order.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by_key(Finding::sort_key);
}
