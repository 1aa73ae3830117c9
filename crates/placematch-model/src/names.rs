//! Place-name sets drawn from a single data source.
//!
//! A [`NameSet`] holds the distinct raw names of one place-name column, in
//! first-seen order, each optionally tagged with a parent region (the
//! province, when the names are counties).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tokens that stand for a missing name in the source data.
pub const NULL_TOKENS: &[&str] = &["Null", "NULL", "null", "NaN", "nan", "NA", "N/A"];

/// Returns true if the raw value is blank or one of [`NULL_TOKENS`].
pub fn is_null_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || NULL_TOKENS.contains(&trimmed)
}

/// A single raw name with its optional parent region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub name: String,
    pub parent: Option<String>,
}

/// Distinct raw place names from one source column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSet {
    entries: Vec<NameEntry>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw column values, dropping null tokens and duplicates.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for value in values {
            set.insert(value.as_ref(), None);
        }
        set
    }

    /// Build a set from `(name, parent)` pairs.
    ///
    /// Null-token parents are stored as `None`. When a name repeats, the
    /// first parent seen is kept.
    pub fn from_pairs<I, S, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<P>)>,
        S: AsRef<str>,
        P: AsRef<str>,
    {
        let mut set = Self::new();
        for (name, parent) in pairs {
            set.insert(name.as_ref(), parent.as_ref().map(|p| p.as_ref()));
        }
        set
    }

    /// Insert a raw name. Returns false if it was a null token or already present.
    pub fn insert(&mut self, name: &str, parent: Option<&str>) -> bool {
        if is_null_token(name) || self.contains(name) {
            return false;
        }
        let parent = parent
            .filter(|p| !is_null_token(p))
            .map(|p| p.trim().to_string());
        self.entries.push(NameEntry {
            name: name.to_string(),
            parent,
        });
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    /// Raw names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .and_then(|e| e.parent.as_deref())
    }

    /// True if at least one entry carries a parent region.
    pub fn has_parents(&self) -> bool {
        self.entries.iter().any(|e| e.parent.is_some())
    }

    /// Entries whose parent region equals `parent`, compared case-insensitively.
    pub fn scoped_to(&self, parent: &str) -> NameSet {
        let wanted = parent.trim().to_lowercase();
        NameSet {
            entries: self
                .entries
                .iter()
                .filter(|e| {
                    e.parent
                        .as_deref()
                        .is_some_and(|p| p.to_lowercase() == wanted)
                })
                .cloned()
                .collect(),
        }
    }

    /// Group names by parent region. Names without a parent are keyed by `None`.
    pub fn group_by_parent(&self) -> BTreeMap<Option<String>, NameSet> {
        let mut groups: BTreeMap<Option<String>, NameSet> = BTreeMap::new();
        for entry in &self.entries {
            groups
                .entry(entry.parent.clone())
                .or_default()
                .entries
                .push(entry.clone());
        }
        groups
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_tokens_and_duplicates_are_dropped() {
        let set = NameSet::from_values(["Tehran", "Null", "", "  ", "Rey", "Tehran", "NaN"]);
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["Tehran", "Rey"]);
    }

    #[test]
    fn first_parent_is_kept() {
        let set = NameSet::from_pairs([
            ("Behbahan", Some("Khuzestan")),
            ("Behbahan", Some("Kohgiluyeh")),
            ("Izeh", None::<&str>),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.parent_of("Behbahan"), Some("Khuzestan"));
        assert_eq!(set.parent_of("Izeh"), None);
    }

    #[test]
    fn scoped_to_ignores_case() {
        let set = NameSet::from_pairs([
            ("Shiraz", Some("Fars")),
            ("Kazerun", Some("fars")),
            ("Yazd", Some("Yazd")),
        ]);
        let fars = set.scoped_to("FARS");
        let names: Vec<&str> = fars.names().collect();
        assert_eq!(names, vec!["Shiraz", "Kazerun"]);
        assert!(set.scoped_to("Tehran").is_empty());
    }
}
