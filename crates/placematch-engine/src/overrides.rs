//! Hand-curated name overrides loaded from CSV.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::mapping_table::{PairRow, read_pairs, read_pairs_from_path};

/// Manual source → canonical name pairings.
///
/// Overrides always take precedence over automatic matches for the same
/// source name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, String>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (original, canonical) in pairs {
            table.insert(original, canonical);
        }
        table
    }

    /// Add a pairing, returning the canonical name it replaced.
    pub fn insert(
        &mut self,
        original: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(original.into(), canonical.into())
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    pub fn contains(&self, original: &str) -> bool {
        self.entries.contains_key(original)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Swap the direction of every pairing.
    ///
    /// Useful for tables authored canonical → original. When several
    /// originals share a canonical name, the last one in key order wins.
    #[must_use]
    pub fn invert(&self) -> Self {
        let mut inverted = Self::new();
        for (original, canonical) in &self.entries {
            if let Some(previous) = inverted.insert(canonical.clone(), original.clone()) {
                warn!(
                    canonical = %canonical,
                    dropped = %previous,
                    kept = %original,
                    "override inversion collapsed two entries"
                );
            }
        }
        inverted
    }

    /// Load overrides from `original_name,canonical_name` CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_rows(read_pairs(reader)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let table = Self::from_rows(read_pairs_from_path(path.as_ref())?);
        debug!(path = %path.as_ref().display(), entries = table.len(), "loaded override table");
        Ok(table)
    }

    fn from_rows(rows: Vec<PairRow>) -> Self {
        let mut table = Self::new();
        for row in rows {
            if row.canonical.is_empty() {
                debug!(original = %row.original, "override row without canonical name skipped");
                continue;
            }
            if let Some(previous) = table.insert(row.original.clone(), row.canonical) {
                warn!(
                    original = %row.original,
                    dropped = %previous,
                    "duplicate override row, keeping the last one"
                );
            }
        }
        table
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
