//! Candidate and decision records produced by the matching engine.

use serde::{Deserialize, Serialize};

/// Best target candidates for one source name under each similarity metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// Source name (normalized form used for comparison).
    pub source_name: String,
    /// Target with the smallest edit distance.
    pub best_by_distance: String,
    /// Target with the highest similarity ratio.
    pub best_by_ratio: String,
    /// Smallest edit distance over the target set.
    pub distance_value: usize,
    /// Highest similarity ratio over the target set.
    pub ratio_value: f64,
}

impl CandidateMatch {
    /// True when both metrics point at the same target.
    pub fn metrics_agree(&self) -> bool {
        self.best_by_distance == self.best_by_ratio
    }
}

/// Outcome of the automatic decision rule for one source name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "target", rename_all = "snake_case")]
pub enum MatchDecision {
    Matched(String),
    Unmatched,
}

impl MatchDecision {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Matched(target) => Some(target),
            Self::Unmatched => None,
        }
    }
}

/// One row of the flat match table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub source_name: String,
    pub name_by_distance: String,
    pub name_by_ratio: String,
    pub distance: usize,
    pub ratio: f64,
    pub metrics_agree: bool,
    /// Accepted target, `None` when left for manual resolution.
    pub matched: Option<String>,
}

/// One target in the per-name detail listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub target_name: String,
    pub distance: usize,
    pub ratio: f64,
}
