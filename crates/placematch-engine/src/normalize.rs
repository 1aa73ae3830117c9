//! Name canonicalization and the normalized-to-raw reverse lookup.

use std::collections::BTreeMap;

use placematch_model::NameSet;
use serde::Serialize;

pub use placematch_model::is_null_token;

/// Canonicalize a raw name for comparison.
///
/// Surrounding whitespace and control characters are always stripped. With
/// `case_fold`, the first character is uppercased and the rest lowercased
/// (`"tehran JONUB"` becomes `"Tehran jonub"`).
pub fn normalize(name: &str, case_fold: bool) -> String {
    let trimmed = name.trim_matches(|c: char| c.is_whitespace() || c.is_control());
    if case_fold {
        capitalize(trimmed)
    } else {
        trimmed.to_string()
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Distinct raw names that normalize to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub normalized: String,
    pub raw_forms: Vec<String>,
}

/// Reverse lookup from normalized names back to the raw forms they came from.
#[derive(Debug, Clone, Default)]
pub struct NormalizedIndex {
    order: Vec<String>,
    forms: BTreeMap<String, Vec<String>>,
}

impl NormalizedIndex {
    /// Index every name of `names`, in set order.
    pub fn build(names: &NameSet, case_fold: bool) -> Self {
        let mut index = Self::default();
        for raw in names.names() {
            let key = normalize(raw, case_fold);
            if key.is_empty() {
                continue;
            }
            let forms = index.forms.entry(key.clone()).or_default();
            if forms.is_empty() {
                index.order.push(key);
            }
            forms.push(raw.to_string());
        }
        index
    }

    /// Distinct normalized names in first-seen order.
    pub fn normalized_names(&self) -> &[String] {
        &self.order
    }

    /// Raw form for a normalized name. The last raw form indexed wins when
    /// several collapse onto the same key; see [`Self::collisions`].
    pub fn resolve(&self, normalized: &str) -> Option<&str> {
        self.forms
            .get(normalized)
            .and_then(|forms| forms.last())
            .map(String::as_str)
    }

    /// Every raw form that normalizes to `normalized`.
    pub fn raw_forms(&self, normalized: &str) -> &[String] {
        self.forms.get(normalized).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Normalized keys shared by more than one raw form.
    pub fn collisions(&self) -> Vec<Collision> {
        self.order
            .iter()
            .filter_map(|key| {
                let forms = &self.forms[key];
                (forms.len() > 1).then(|| Collision {
                    normalized: key.clone(),
                    raw_forms: forms.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_semantics() {
        assert_eq!(normalize("tehran JONUB", true), "Tehran jonub");
        assert_eq!(normalize("Gonbad-e-Kavus", true), "Gonbad-e-kavus");
        assert_eq!(normalize("Gonbad-e-Kavus", false), "Gonbad-e-Kavus");
        assert_eq!(normalize("", true), "");
    }

    #[test]
    fn strips_stray_control_characters() {
        assert_eq!(normalize("Yasooj\r", false), "Yasooj");
        assert_eq!(normalize("  Izeh\t", true), "Izeh");
    }

    #[test]
    fn index_reports_collisions_and_keeps_last_form() {
        let names = NameSet::from_values(["kish", "Kish", "Mashhad", "KISH"]);
        let index = NormalizedIndex::build(&names, true);

        assert_eq!(index.normalized_names(), &["Kish".to_string(), "Mashhad".to_string()]);
        assert_eq!(index.resolve("Kish"), Some("KISH"));
        assert_eq!(index.raw_forms("Kish").len(), 3);

        let collisions = index.collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].normalized, "Kish");
        assert_eq!(collisions[0].raw_forms, vec!["kish", "Kish", "KISH"]);
    }

    #[test]
    fn no_collisions_without_case_fold() {
        let names = NameSet::from_values(["kish", "Kish"]);
        let index = NormalizedIndex::build(&names, false);
        assert_eq!(index.len(), 2);
        assert!(index.collisions().is_empty());
        assert!(index.raw_forms("Tehran").is_empty());
    }
}
