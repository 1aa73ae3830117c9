//! Pairwise candidate matrix between a source and a target name list.
//!
//! Every (source, target) cell holds both the edit distance and the
//! similarity ratio. Name sets here are in the hundreds, so the full cross
//! product is computed without pruning or indexing.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use placematch_model::{CandidateMatch, RankedCandidate};

use crate::similarity::Similarity;

/// Full distance/ratio matrix, stored row-major (one row per source).
#[derive(Debug, Clone)]
pub struct CandidateMatrix {
    sources: Vec<String>,
    targets: Vec<String>,
    cells: Vec<Similarity>,
}

impl CandidateMatrix {
    pub fn build<S, T>(sources: &[S], targets: &[T]) -> Self
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut cells = Vec::with_capacity(sources.len() * targets.len());
        for source in sources {
            for target in targets {
                cells.push(Similarity::between(source.as_ref(), target.as_ref()));
            }
        }
        Self {
            sources: sources.iter().map(|s| s.as_ref().to_string()).collect(),
            targets: targets.iter().map(|t| t.as_ref().to_string()).collect(),
            cells,
        }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// True when either side is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, source_idx: usize, target_idx: usize) -> Option<&Similarity> {
        if source_idx >= self.sources.len() || target_idx >= self.targets.len() {
            return None;
        }
        self.cells.get(source_idx * self.targets.len() + target_idx)
    }

    fn row(&self, source_idx: usize) -> &[Similarity] {
        let width = self.targets.len();
        &self.cells[source_idx * width..(source_idx + 1) * width]
    }

    /// Best candidates for the source at `source_idx`.
    ///
    /// Ties go to the target that comes first in target order, under both
    /// metrics. Returns `None` when the target list is empty.
    pub fn best_for(&self, source_idx: usize) -> Option<CandidateMatch> {
        let source = self.sources.get(source_idx)?;
        let row = self.row(source_idx);
        let first = row.first()?;

        let (mut dist_idx, mut best_dist) = (0, first.distance);
        let (mut ratio_idx, mut best_ratio) = (0, first.ratio);
        for (idx, cell) in row.iter().enumerate().skip(1) {
            if cell.distance < best_dist {
                dist_idx = idx;
                best_dist = cell.distance;
            }
            if cell.ratio > best_ratio {
                ratio_idx = idx;
                best_ratio = cell.ratio;
            }
        }

        Some(CandidateMatch {
            source_name: source.clone(),
            best_by_distance: self.targets[dist_idx].clone(),
            best_by_ratio: self.targets[ratio_idx].clone(),
            distance_value: best_dist,
            ratio_value: best_ratio,
        })
    }

    /// Best candidates for every source name.
    ///
    /// Empty when either side is empty.
    pub fn best_candidates(&self) -> BTreeMap<String, CandidateMatch> {
        (0..self.sources.len())
            .filter_map(|idx| self.best_for(idx))
            .map(|candidate| (candidate.source_name.clone(), candidate))
            .collect()
    }

    /// All targets for one source, best first: ratio descending, then
    /// distance ascending, then target order.
    pub fn ranked(&self, source: &str) -> Option<Vec<RankedCandidate>> {
        let source_idx = self.sources.iter().position(|s| s == source)?;
        Some(self.ranked_at(source_idx))
    }

    fn ranked_at(&self, source_idx: usize) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = self
            .row(source_idx)
            .iter()
            .zip(&self.targets)
            .map(|(cell, target)| RankedCandidate {
                target_name: target.clone(),
                distance: cell.distance,
                ratio: cell.ratio,
            })
            .collect();
        // stable sort keeps target order among equal scores
        ranked.sort_by(|a, b| {
            b.ratio
                .partial_cmp(&a.ratio)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.distance.cmp(&b.distance))
        });
        ranked
    }

    /// Ranked listing for every source name.
    pub fn ranked_all(&self) -> BTreeMap<String, Vec<RankedCandidate>> {
        self.sources
            .iter()
            .enumerate()
            .map(|(idx, source)| (source.clone(), self.ranked_at(idx)))
            .collect()
    }
}

/// Name lists left over after removing exact matches from both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefiltered {
    pub sources: Vec<String>,
    pub targets: Vec<String>,
    /// Names present on both sides, in source order.
    pub exact: Vec<String>,
}

/// Remove names present in both lists from both lists.
///
/// Comparison is byte-wise, so callers pass already-normalized names.
pub fn prefilter_exact<S, T>(sources: &[S], targets: &[T]) -> Prefiltered
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let sources: Vec<&str> = sources.iter().map(|s| s.as_ref()).collect();
    let targets: Vec<&str> = targets.iter().map(|t| t.as_ref()).collect();
    let source_set: BTreeSet<&str> = sources.iter().copied().collect();
    let target_set: BTreeSet<&str> = targets.iter().copied().collect();

    let mut result = Prefiltered::default();
    for source in sources {
        if target_set.contains(source) {
            if !result.exact.iter().any(|e| e == source) {
                result.exact.push(source.to_string());
            }
        } else {
            result.sources.push(source.to_string());
        }
    }
    result.targets = targets
        .into_iter()
        .filter(|target| !source_set.contains(target))
        .map(str::to_string)
        .collect();
    result
}
