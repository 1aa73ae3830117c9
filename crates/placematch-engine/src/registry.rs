//! Composition of automatic, manual and exact matches into one mapping, and
//! its application to a dataset column.

use std::collections::{BTreeMap, BTreeSet};

use placematch_model::{CellValue, Dataset, MatchDecision, MatchOrigin, NameMapping};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::overrides::OverrideTable;

/// Compose the three match layers, later layers winning:
///
/// 1. accepted automatic matches (unmatched decisions are skipped);
/// 2. manual overrides;
/// 3. exact matches, source name to the identical target spelling.
///
/// The result only holds names that received a canonical value; call
/// [`NameMapping::cover`] to make it total over a source set.
pub fn build_mapping(
    auto_matches: &BTreeMap<String, MatchDecision>,
    overrides: &OverrideTable,
    exact_matches: &BTreeMap<String, String>,
) -> NameMapping {
    let mut mapping = NameMapping::new();
    for (source, decision) in auto_matches {
        if let MatchDecision::Matched(target) = decision {
            mapping.insert(source.as_str(), target.as_str(), MatchOrigin::Auto);
        }
    }
    for (source, canonical) in overrides.iter() {
        mapping.insert(source, canonical, MatchOrigin::Manual);
    }
    for (source, target) in exact_matches {
        mapping.insert(source.as_str(), target.as_str(), MatchOrigin::Exact);
    }
    mapping
}

/// Manual knowledge layered on top of automatic matching: an override
/// table and a list of source names whose automatic match is known bad.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationRegistry {
    overrides: OverrideTable,
    rejected: BTreeSet<String>,
}

impl ReconciliationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: OverrideTable) -> Self {
        self.overrides = overrides;
        self
    }

    /// Drop the automatic match of these source names. Manual and exact
    /// layers still apply to them.
    #[must_use]
    pub fn with_rejected<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rejected.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    pub fn is_rejected(&self, source: &str) -> bool {
        self.rejected.contains(source)
    }

    /// [`build_mapping`] with this registry's overrides and rejections.
    pub fn build_mapping(
        &self,
        auto_matches: &BTreeMap<String, MatchDecision>,
        exact_matches: &BTreeMap<String, String>,
    ) -> NameMapping {
        let accepted: BTreeMap<String, MatchDecision> = auto_matches
            .iter()
            .filter(|(source, decision)| {
                let rejected = decision.is_matched() && self.is_rejected(source);
                if rejected {
                    debug!(source = %source, "automatic match rejected");
                }
                !rejected
            })
            .map(|(source, decision)| (source.clone(), decision.clone()))
            .collect();
        build_mapping(&accepted, &self.overrides, exact_matches)
    }
}

/// Outcome counts of [`apply_with_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyStats {
    /// Cells whose value had a canonical name.
    pub relabeled: usize,
    /// Text cells left as they were because the mapping has no canonical
    /// name for them.
    pub unchanged: usize,
    /// Empty cells.
    pub missing: usize,
}

/// Relabel `column` of `dataset` through `mapping`.
///
/// Values without a canonical name pass through verbatim and the row count
/// never changes. Only a missing column is an error.
pub fn apply(mapping: &NameMapping, dataset: &Dataset, column: &str) -> Result<Dataset> {
    apply_with_stats(mapping, dataset, column).map(|(relabeled, _)| relabeled)
}

/// [`apply`], also reporting how many cells were relabeled.
pub fn apply_with_stats(
    mapping: &NameMapping,
    dataset: &Dataset,
    column: &str,
) -> Result<(Dataset, ApplyStats)> {
    let idx = dataset.column_index(column)?;
    let mut output = dataset.clone();
    let mut stats = ApplyStats::default();

    for row in &mut output.rows {
        let cell = &mut row[idx];
        let canonical = match &*cell {
            CellValue::Text(value) => mapping.canonical(value),
            CellValue::Missing => {
                stats.missing += 1;
                continue;
            }
        };
        match canonical {
            Some(canonical) => {
                *cell = CellValue::Text(canonical.to_string());
                stats.relabeled += 1;
            }
            None => stats.unchanged += 1,
        }
    }

    info!(
        column,
        rows = output.row_count(),
        relabeled = stats.relabeled,
        unchanged = stats.unchanged,
        missing = stats.missing,
        "applied name mapping"
    );
    Ok((output, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto(pairs: &[(&str, Option<&str>)]) -> BTreeMap<String, MatchDecision> {
        pairs
            .iter()
            .map(|(source, target)| {
                let decision = match target {
                    Some(t) => MatchDecision::Matched((*t).to_string()),
                    None => MatchDecision::Unmatched,
                };
                ((*source).to_string(), decision)
            })
            .collect()
    }

    #[test]
    fn unmatched_auto_decisions_are_skipped() {
        let mapping = build_mapping(
            &auto(&[("Ray", None), ("Bojnourd", Some("Bojnurd"))]),
            &OverrideTable::new(),
            &BTreeMap::new(),
        );
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.canonical("Bojnourd"), Some("Bojnurd"));
        assert!(!mapping.contains("Ray"));
    }

    #[test]
    fn rejection_drops_only_the_auto_layer() {
        let registry = ReconciliationRegistry::new()
            .with_overrides(OverrideTable::from_pairs([("Ray", "Rey")]))
            .with_rejected(["Ray", "Bojnourd"]);
        let mapping = registry.build_mapping(
            &auto(&[("Ray", Some("Rasht")), ("Bojnourd", Some("Bojnurd"))]),
            &BTreeMap::new(),
        );
        assert_eq!(mapping.canonical("Ray"), Some("Rey"));
        assert_eq!(mapping.get("Ray").map(|e| e.origin), Some(MatchOrigin::Manual));
        assert!(!mapping.contains("Bojnourd"));
    }

    #[test]
    fn apply_counts_cells() {
        let mut dataset = Dataset::new(vec!["county".to_string(), "cases".to_string()]);
        for (county, cases) in [("Ray", "3"), ("", "1"), ("Izeh", "2")] {
            dataset
                .push_row(vec![CellValue::from_raw(county), CellValue::from_raw(cases)])
                .unwrap();
        }
        let mut mapping = NameMapping::new();
        mapping.insert("Ray", "Rey", MatchOrigin::Manual);

        let (out, stats) = apply_with_stats(&mapping, &dataset, "county").unwrap();
        assert_eq!(
            stats,
            ApplyStats {
                relabeled: 1,
                unchanged: 1,
                missing: 1,
            }
        );
        assert_eq!(out.rows[0][0], CellValue::Text("Rey".to_string()));
        assert_eq!(out.rows[1][0], CellValue::Missing);
        assert_eq!(out.rows[2][0], CellValue::Text("Izeh".to_string()));
        assert_eq!(out.rows[0][1], dataset.rows[0][1]);
    }
}
