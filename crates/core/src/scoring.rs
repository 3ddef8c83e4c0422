//! Aggregate quality score.
//!
//! Reduces a list of findings to one 0–100 value. Each finding contributes its
//! 0–10 score multiplied by its priority weight (high 3, medium 2, low 1), and
//! the sum is normalized against the best possible total:
//!
//! ```text
//! value = round(Σ score·weight / Σ 10·weight × 100)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::finding::Finding;

/// Colour band of an aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    Red,
    Orange,
    Yellow,
    Green,
}

impl fmt::Display for ScoreColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScoreColor::Red => "red",
            ScoreColor::Orange => "orange",
            ScoreColor::Yellow => "yellow",
            ScoreColor::Green => "green",
        })
    }
}

/// Overall score derived from a finding list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateScore {
    /// 0–100.
    pub value: u8,
    pub label: String,
    pub color: ScoreColor,
}

/// Label used when there is nothing to score.
pub const NOT_EVALUATED: &str = "Not evaluated";

/// Lower bounds of each band, highest first.
const BANDS: [(u8, &str, ScoreColor); 10] = [
    (90, "Excellent", ScoreColor::Green),
    (80, "Very good", ScoreColor::Green),
    (70, "Good", ScoreColor::Green),
    (60, "Fair", ScoreColor::Yellow),
    (50, "Average", ScoreColor::Yellow),
    (40, "Weak", ScoreColor::Orange),
    (30, "Insufficient", ScoreColor::Orange),
    (20, "Poor", ScoreColor::Red),
    (10, "Very poor", ScoreColor::Red),
    (0, "Critical", ScoreColor::Red),
];

/// Maps a 0–100 value to its label and colour.
pub fn band(value: u8) -> (&'static str, ScoreColor) {
    BANDS
        .iter()
        .find(|(floor, _, _)| value >= *floor)
        .map(|(_, label, color)| (*label, *color))
        .unwrap_or(("Critical", ScoreColor::Red))
}

/// Aggregates findings into a single score.
///
/// An empty list yields `0 / "Not evaluated" / red`.
///
/// # Example
///
/// ```rust
/// use lexiscore_core::{Category, Finding, Priority, ScoreColor, Status, aggregate};
///
/// let finding = |score, priority| Finding {
///     id: "example".into(),
///     title: String::new(),
///     description: String::new(),
///     status: Status::Good,
///     score,
///     priority,
///     category: Category::Meta,
///     suggestions: vec![],
/// };
/// let score = aggregate(&[finding(10, Priority::High), finding(0, Priority::Low)]);
/// assert_eq!(score.value, 75);
/// assert_eq!(score.label, "Good");
/// assert_eq!(score.color, ScoreColor::Green);
/// ```
pub fn aggregate(findings: &[Finding]) -> AggregateScore {
    if findings.is_empty() {
        return AggregateScore { value: 0, label: NOT_EVALUATED.to_string(), color: ScoreColor::Red };
    }

    let (total_score, total_weight) = findings.iter().fold((0u32, 0u32), |(score, weight), finding| {
        let w = finding.priority.weight();
        (score + u32::from(finding.score.min(10)) * w, weight + 10 * w)
    });

    let value = (f64::from(total_score) / f64::from(total_weight) * 100.0).round().clamp(0.0, 100.0) as u8;
    let (label, color) = band(value);

    AggregateScore { value, label: label.to_string(), color }
}
