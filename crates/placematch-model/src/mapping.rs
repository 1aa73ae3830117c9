//! The authoritative raw-name to canonical-name mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::names::NameSet;

/// Where a mapping entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    /// Accepted by the automatic matcher.
    Auto,
    /// Supplied by a curated override table.
    Manual,
    /// Identical to a target name after normalization.
    Exact,
    /// Read back from an exported mapping table.
    Imported,
    /// No canonical name found; needs manual resolution.
    Unresolved,
}

impl MatchOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
            Self::Exact => "exact",
            Self::Imported => "imported",
            Self::Unresolved => "unresolved",
        }
    }
}

impl std::fmt::Display for MatchOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Canonical target name, `None` when unmatched.
    pub canonical: Option<String>,
    pub origin: MatchOrigin,
}

/// Mapping from raw source names to canonical names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMapping {
    entries: BTreeMap<String, MappingEntry>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canonical name for `source`, replacing any earlier entry.
    pub fn insert(
        &mut self,
        source: impl Into<String>,
        canonical: impl Into<String>,
        origin: MatchOrigin,
    ) {
        self.entries.insert(
            source.into(),
            MappingEntry {
                canonical: Some(canonical.into()),
                origin,
            },
        );
    }

    /// Record `source` as unresolved unless it already has an entry.
    pub fn insert_unmatched(&mut self, source: impl Into<String>) {
        self.entries
            .entry(source.into())
            .or_insert(MappingEntry {
                canonical: None,
                origin: MatchOrigin::Unresolved,
            });
    }

    pub fn remove(&mut self, source: &str) -> Option<MappingEntry> {
        self.entries.remove(source)
    }

    pub fn get(&self, source: &str) -> Option<&MappingEntry> {
        self.entries.get(source)
    }

    /// Canonical name for `source`, if it has been resolved.
    pub fn canonical(&self, source: &str) -> Option<&str> {
        self.entries
            .get(source)
            .and_then(|entry| entry.canonical.as_deref())
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MappingEntry)> {
        self.entries.iter()
    }

    /// Add an unresolved entry for every name in `names` that has none.
    ///
    /// After this call the mapping is total over `names`.
    pub fn cover(&mut self, names: &NameSet) {
        for name in names.names() {
            self.insert_unmatched(name);
        }
    }

    /// True if every name in `names` has a resolved canonical name.
    pub fn is_complete_for(&self, names: &NameSet) -> bool {
        names.names().all(|name| self.canonical(name).is_some())
    }

    /// Source names without a canonical name, in sorted order.
    pub fn unresolved(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.canonical.is_none())
            .map(|(source, _)| source.as_str())
            .collect()
    }

    /// Key/value view, ignoring origins.
    pub fn pairs(&self) -> BTreeMap<String, Option<String>> {
        self.entries
            .iter()
            .map(|(source, entry)| (source.clone(), entry.canonical.clone()))
            .collect()
    }

    /// Entry counts per origin.
    pub fn count_by_origin(&self) -> BTreeMap<MatchOrigin, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.entries.values() {
            *counts.entry(entry.origin).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_unmatched_keeps_existing_entry() {
        let mut mapping = NameMapping::new();
        mapping.insert("Ray", "Rey", MatchOrigin::Manual);
        mapping.insert_unmatched("Ray");
        assert_eq!(mapping.canonical("Ray"), Some("Rey"));
    }

    #[test]
    fn cover_makes_mapping_total() {
        let names = NameSet::from_values(["Ray", "Tehran Jonub", "Mashhad"]);
        let mut mapping = NameMapping::new();
        mapping.insert("Mashhad", "Mashhad", MatchOrigin::Exact);
        assert!(!mapping.is_complete_for(&names));

        mapping.cover(&names);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.unresolved(), vec!["Ray", "Tehran Jonub"]);
        assert_eq!(mapping.get("Ray").map(|e| e.origin), Some(MatchOrigin::Unresolved));
    }

    #[test]
    fn count_by_origin() {
        let mut mapping = NameMapping::new();
        mapping.insert("a", "A", MatchOrigin::Auto);
        mapping.insert("b", "B", MatchOrigin::Auto);
        mapping.insert("c", "C", MatchOrigin::Manual);
        mapping.insert_unmatched("d");
        let counts = mapping.count_by_origin();
        assert_eq!(counts.get(&MatchOrigin::Auto), Some(&2));
        assert_eq!(counts.get(&MatchOrigin::Manual), Some(&1));
        assert_eq!(counts.get(&MatchOrigin::Unresolved), Some(&1));
        assert_eq!(counts.get(&MatchOrigin::Exact), None);
    }
}
