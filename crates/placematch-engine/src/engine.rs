//! End-to-end matching run over two name sets.

use std::collections::{BTreeMap, BTreeSet};

use placematch_model::{
    MatchDecision, MatchOptions, MatchRow, NameMapping, NameSet, RankedCandidate,
};
use serde::Serialize;
use tracing::{debug, debug_span, info, info_span, warn};

use crate::automatch::{decide, match_table};
use crate::error::Result;
use crate::matrix::{CandidateMatrix, prefilter_exact};
use crate::normalize::{Collision, NormalizedIndex, normalize};
use crate::registry::ReconciliationRegistry;

/// Result listing in the shape selected by [`MatchOptions::as_table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutput {
    /// One row per fuzzily matched source name, sorted by name.
    Table(Vec<MatchRow>),
    /// Every target ranked for each fuzzily matched source name.
    Detail(BTreeMap<String, Vec<RankedCandidate>>),
}

impl MatchOutput {
    pub fn len(&self) -> usize {
        match self {
            Self::Table(rows) => rows.len(),
            Self::Detail(detail) => detail.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything one matching run produced. All names are raw spellings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub output: MatchOutput,
    /// Decision for every source name that went through fuzzy matching.
    pub decisions: BTreeMap<String, MatchDecision>,
    /// Accepted automatic matches, source to target.
    pub auto_matches: BTreeMap<String, String>,
    /// Source names whose normalized form is also a target name, mapped to
    /// that target's spelling.
    pub exact_matches: BTreeMap<String, String>,
    /// Source names with neither an exact nor an automatic match, sorted.
    pub unmatched: Vec<String>,
    /// Raw names that collapsed onto one normalized form, on either side.
    pub collisions: Vec<Collision>,
}

impl MatchReport {
    /// Compose the final mapping through `registry` and make it total over
    /// `source`.
    pub fn build_mapping(&self, registry: &ReconciliationRegistry, source: &NameSet) -> NameMapping {
        let mut mapping = registry.build_mapping(&self.decisions, &self.exact_matches);
        mapping.cover(source);
        mapping
    }
}

/// Per-scope intermediate result, merged into a [`MatchReport`]. Only the
/// listing selected by [`MatchOptions::as_table`] is filled.
#[derive(Default)]
struct ScopeOutcome {
    rows: Vec<MatchRow>,
    detail: BTreeMap<String, Vec<RankedCandidate>>,
    decisions: BTreeMap<String, MatchDecision>,
}

/// Drives normalization, matrix construction and the decision rule.
#[derive(Debug, Clone, Default)]
pub struct PlaceMatcher {
    options: MatchOptions,
}

impl PlaceMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Match every name of `source` against `target`.
    ///
    /// Exact matches are found against the whole target set. Parent scoping
    /// only narrows the fuzzy matrix. Fails only on invalid options; empty
    /// sets give an empty report with every source name unmatched.
    pub fn run(&self, source: &NameSet, target: &NameSet) -> Result<MatchReport> {
        self.options.validate()?;
        let span = info_span!(
            "place_match",
            sources = source.len(),
            targets = target.len(),
            cutoff = self.options.cutoff
        );
        let _guard = span.enter();

        let case_fold = self.options.case_fold;
        let source_index = NormalizedIndex::build(source, case_fold);
        let target_index = NormalizedIndex::build(target, case_fold);

        let mut collisions = source_index.collisions();
        collisions.extend(target_index.collisions());
        for collision in &collisions {
            warn!(
                normalized = %collision.normalized,
                raw_forms = ?collision.raw_forms,
                "distinct names collapse after normalization; last form wins"
            );
        }

        let shared = prefilter_exact(source_index.normalized_names(), target_index.normalized_names());
        let mut exact_matches = BTreeMap::new();
        for key in &shared.exact {
            let canonical = target_index.resolve(key).unwrap_or(key);
            for raw in source_index.raw_forms(key) {
                exact_matches.insert(raw.clone(), canonical.to_string());
            }
        }
        let exact_keys: BTreeSet<&str> = shared.exact.iter().map(String::as_str).collect();

        let mut merged = ScopeOutcome::default();
        for (group, targets) in self.scopes(source, target) {
            let outcome = self.run_scope(&group, &targets, &exact_keys);
            merged.rows.extend(outcome.rows);
            merged.detail.extend(outcome.detail);
            merged.decisions.extend(outcome.decisions);
        }
        let ScopeOutcome {
            mut rows,
            detail,
            decisions,
        } = merged;
        let output = if self.options.as_table {
            rows.sort_by(|a, b| a.source_name.cmp(&b.source_name));
            MatchOutput::Table(rows)
        } else {
            MatchOutput::Detail(detail)
        };

        let auto_matches: BTreeMap<String, String> = decisions
            .iter()
            .filter_map(|(name, decision)| {
                decision.target().map(|t| (name.clone(), t.to_string()))
            })
            .collect();
        let mut unmatched: Vec<String> = source
            .names()
            .filter(|name| !exact_matches.contains_key(*name) && !auto_matches.contains_key(*name))
            .map(str::to_string)
            .collect();
        unmatched.sort();

        info!(
            exact = exact_matches.len(),
            auto = auto_matches.len(),
            unmatched = unmatched.len(),
            collisions = collisions.len(),
            "matching finished"
        );

        Ok(MatchReport {
            output,
            decisions,
            auto_matches,
            exact_matches,
            unmatched,
            collisions,
        })
    }

    /// Split the run into (source subset, target subset) pairs.
    ///
    /// Without parent scoping this is the whole of both sets. With it, each
    /// parent group of the source is matched against the targets sharing
    /// that parent, falling back to the whole target set when no target
    /// carries it.
    fn scopes<'t>(&self, source: &NameSet, target: &'t NameSet) -> Vec<(NameSet, ScopedTargets<'t>)> {
        if !self.options.scope_by_parent || !source.has_parents() || !target.has_parents() {
            return vec![(source.clone(), ScopedTargets::All(target))];
        }
        source
            .group_by_parent()
            .into_iter()
            .map(|(parent, group)| {
                let scoped = parent
                    .as_deref()
                    .map(|p| target.scoped_to(p))
                    .filter(|subset| !subset.is_empty());
                match scoped {
                    Some(subset) => (group, ScopedTargets::Subset(subset)),
                    None => {
                        debug!(parent = ?parent, "no targets share this parent, using all targets");
                        (group, ScopedTargets::All(target))
                    }
                }
            })
            .collect()
    }

    /// Fuzzy matching of one scope. `exact_keys` holds the normalized names
    /// shared by the full source and target sets.
    fn run_scope(
        &self,
        source: &NameSet,
        targets: &ScopedTargets<'_>,
        exact_keys: &BTreeSet<&str>,
    ) -> ScopeOutcome {
        let target = targets.as_set();
        let span = debug_span!("scope", sources = source.len(), targets = target.len());
        let _guard = span.enter();

        let case_fold = self.options.case_fold;
        let source_index = NormalizedIndex::build(source, case_fold);
        let target_index = NormalizedIndex::build(target, case_fold);

        let keep = |name: &&String| !self.options.unique_only || !exact_keys.contains(name.as_str());
        let sources: Vec<String> = source_index
            .normalized_names()
            .iter()
            .filter(keep)
            .cloned()
            .collect();
        let targets: Vec<String> = target_index
            .normalized_names()
            .iter()
            .filter(keep)
            .cloned()
            .collect();

        let matrix = CandidateMatrix::build(&sources, &targets);
        let candidates = matrix.best_candidates();
        let normalized_decisions = decide(&candidates, self.options.cutoff);

        let raw_target = |name: &str| target_index.resolve(name).unwrap_or(name).to_string();

        let mut outcome = ScopeOutcome::default();
        for key in &sources {
            let decision = match normalized_decisions.get(key) {
                Some(MatchDecision::Matched(name)) => MatchDecision::Matched(raw_target(name)),
                _ => MatchDecision::Unmatched,
            };
            debug!(source = %key, decision = ?decision, "decided");
            for raw in source_index.raw_forms(key) {
                outcome.decisions.insert(raw.clone(), decision.clone());
            }
        }

        if self.options.as_table {
            for row in match_table(&candidates, self.options.cutoff) {
                for raw in source_index.raw_forms(&row.source_name) {
                    outcome.rows.push(MatchRow {
                        source_name: raw.clone(),
                        name_by_distance: raw_target(&row.name_by_distance),
                        name_by_ratio: raw_target(&row.name_by_ratio),
                        distance: row.distance,
                        ratio: row.ratio,
                        metrics_agree: row.metrics_agree,
                        matched: row.matched.as_deref().map(raw_target),
                    });
                }
            }
        } else {
            for (key, ranked) in matrix.ranked_all() {
                let ranked: Vec<RankedCandidate> = ranked
                    .into_iter()
                    .map(|candidate| RankedCandidate {
                        target_name: raw_target(&candidate.target_name),
                        ..candidate
                    })
                    .collect();
                for raw in source_index.raw_forms(&key) {
                    outcome.detail.insert(raw.clone(), ranked.clone());
                }
            }
        }
        outcome
    }

    /// Every target ranked against one raw name, best first.
    ///
    /// Exact matches are not filtered out, so an identical target ranks
    /// first with ratio 1.
    pub fn rank(&self, name: &str, target: &NameSet) -> Vec<RankedCandidate> {
        let key = normalize(name, self.options.case_fold);
        let target_index = NormalizedIndex::build(target, self.options.case_fold);
        let matrix = CandidateMatrix::build(&[key.as_str()], target_index.normalized_names());
        matrix
            .ranked(&key)
            .unwrap_or_default()
            .into_iter()
            .map(|candidate| RankedCandidate {
                target_name: target_index
                    .resolve(&candidate.target_name)
                    .unwrap_or(&candidate.target_name)
                    .to_string(),
                ..candidate
            })
            .collect()
    }
}

/// Targets one scope is matched against.
enum ScopedTargets<'t> {
    All(&'t NameSet),
    Subset(NameSet),
}

impl ScopedTargets<'_> {
    fn as_set(&self) -> &NameSet {
        match self {
            Self::All(set) => set,
            Self::Subset(set) => set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_cutoff_is_rejected() {
        let matcher = PlaceMatcher::new(MatchOptions::default().with_cutoff(1.5));
        let set = NameSet::from_values(["Rey"]);
        assert!(matcher.run(&set, &set).is_err());
    }

    #[test]
    fn raw_spellings_flow_through() {
        let source = NameSet::from_values(["BOJNOURD", "mashhad "]);
        let target = NameSet::from_values(["Bojnurd", "Mashhad"]);
        let report = PlaceMatcher::default().run(&source, &target).unwrap();

        assert_eq!(report.exact_matches.get("mashhad ").map(String::as_str), Some("Mashhad"));
        assert_eq!(
            report.decisions.get("BOJNOURD"),
            Some(&MatchDecision::Matched("Bojnurd".to_string()))
        );
        let MatchOutput::Table(rows) = &report.output else {
            panic!("expected table output");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_name, "BOJNOURD");
        assert_eq!(rows[0].matched.as_deref(), Some("Bojnurd"));
    }

    #[test]
    fn collisions_are_reported_and_share_a_decision() {
        let source = NameSet::from_values(["bojnourd", "Bojnourd"]);
        let target = NameSet::from_values(["Bojnurd"]);
        let report = PlaceMatcher::default().run(&source, &target).unwrap();

        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].raw_forms, vec!["bojnourd", "Bojnourd"]);
        assert_eq!(report.auto_matches.len(), 2);
        assert!(report.unmatched.is_empty());
    }

    #[test]
    fn keep_exact_leaves_identical_names_in_the_matrix() {
        let source = NameSet::from_values(["Mashhad", "Ray"]);
        let target = NameSet::from_values(["Mashhad", "Rey"]);
        let matcher = PlaceMatcher::new(MatchOptions::default().with_unique_only(false));
        let report = matcher.run(&source, &target).unwrap();

        assert_eq!(report.output.len(), 2);
        assert_eq!(report.exact_matches.len(), 1);
        assert_eq!(
            report.decisions.get("Mashhad"),
            Some(&MatchDecision::Matched("Mashhad".to_string()))
        );
    }

    #[test]
    fn detail_output_ranks_every_target() {
        let source = NameSet::from_values(["Ray"]);
        let target = NameSet::from_values(["Tehran", "Rey", "Mashhad"]);
        let matcher = PlaceMatcher::new(MatchOptions::default().with_as_table(false));
        let report = matcher.run(&source, &target).unwrap();

        let MatchOutput::Detail(detail) = &report.output else {
            panic!("expected detail output");
        };
        let ranked = &detail["Ray"];
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].target_name, "Rey");
    }

    #[test]
    fn parent_scope_restricts_targets() {
        // "Kazerunn" is a decoy from another province
        let source = NameSet::from_pairs([("Kazeroon", Some("Fars")), ("Bahar", Some("Hamadan"))]);
        let target = NameSet::from_pairs([
            ("Kazerun", Some("Fars")),
            ("Bahar", Some("Hamadan")),
            ("Kazerunn", Some("Hamadan")),
        ]);
        let matcher = PlaceMatcher::new(MatchOptions::default().with_scope_by_parent(true));
        let report = matcher.run(&source, &target).unwrap();
        assert_eq!(report.auto_matches.get("Kazeroon").map(String::as_str), Some("Kazerun"));
        assert_eq!(report.exact_matches.get("Bahar").map(String::as_str), Some("Bahar"));
    }

    #[test]
    fn exact_match_crosses_parent_scopes() {
        let source = NameSet::from_pairs([("Bahar", Some("Fars")), ("Kazeroon", Some("Fars"))]);
        let target = NameSet::from_pairs([
            ("Bahar", Some("Hamadan")),
            ("Shiraz", Some("Fars")),
            ("Kazerun", Some("Fars")),
        ]);
        let matcher = PlaceMatcher::new(MatchOptions::default().with_scope_by_parent(true));
        let report = matcher.run(&source, &target).unwrap();

        assert_eq!(report.exact_matches.get("Bahar").map(String::as_str), Some("Bahar"));
        assert!(!report.decisions.contains_key("Bahar"));
        assert_eq!(report.auto_matches.get("Kazeroon").map(String::as_str), Some("Kazerun"));
        assert!(report.unmatched.is_empty());

        let mapping = report.build_mapping(&ReconciliationRegistry::new(), &source);
        assert_eq!(mapping.canonical("Bahar"), Some("Bahar"));
    }

    #[test]
    fn rank_resolves_raw_target_spelling() {
        let target = NameSet::from_values(["REY", "Tehran"]);
        let ranked = PlaceMatcher::default().rank("ray", &target);
        assert_eq!(ranked[0].target_name, "REY");
        assert_eq!(ranked.len(), 2);
    }
}
