//! Agreement-plus-cutoff decision rule.
//!
//! A source name is accepted automatically only when the edit-distance
//! winner and the ratio winner are the same target and that target's ratio
//! reaches the cutoff. Everything else is left for manual resolution.

use std::collections::BTreeMap;

use placematch_model::{CandidateMatch, MatchDecision, MatchRow};

/// Classify one candidate.
#[must_use]
pub fn decide_one(candidate: &CandidateMatch, cutoff: f64) -> MatchDecision {
    if candidate.metrics_agree() && candidate.ratio_value >= cutoff {
        MatchDecision::Matched(candidate.best_by_distance.clone())
    } else {
        MatchDecision::Unmatched
    }
}

/// Classify every candidate, keyed by source name.
#[must_use]
pub fn decide(
    candidates: &BTreeMap<String, CandidateMatch>,
    cutoff: f64,
) -> BTreeMap<String, MatchDecision> {
    candidates
        .iter()
        .map(|(source, candidate)| (source.clone(), decide_one(candidate, cutoff)))
        .collect()
}

/// Flat table form of [`decide`]: one row per source name, sorted by name.
#[must_use]
pub fn match_table(candidates: &BTreeMap<String, CandidateMatch>, cutoff: f64) -> Vec<MatchRow> {
    candidates
        .values()
        .map(|candidate| MatchRow {
            source_name: candidate.source_name.clone(),
            name_by_distance: candidate.best_by_distance.clone(),
            name_by_ratio: candidate.best_by_ratio.clone(),
            distance: candidate.distance_value,
            ratio: candidate.ratio_value,
            metrics_agree: candidate.metrics_agree(),
            matched: decide_one(candidate, cutoff).target().map(str::to_string),
        })
        .collect()
}

/// Number of accepted decisions.
#[must_use]
pub fn accepted_count(decisions: &BTreeMap<String, MatchDecision>) -> usize {
    decisions.values().filter(|d| d.is_matched()).count()
}
