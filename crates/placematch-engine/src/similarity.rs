//! Edit distance and similarity ratio between two names.
//!
//! Both metrics operate on Unicode scalar values, so a transliterated name
//! with diacritics counts one edit per character rather than per byte.

use rapidfuzz::distance::{indel, levenshtein};
use serde::Serialize;

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`.
pub fn distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Levenshtein ratio in `[0, 1]`: `(|a| + |b| - indel) / (|a| + |b|)`, where
/// a substitution costs two edits. Two empty strings have ratio 1.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    indel::normalized_similarity(a.chars(), b.chars())
}

/// Both metrics for one pair of names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Similarity {
    pub distance: usize,
    pub ratio: f64,
}

impl Similarity {
    pub fn between(a: &str, b: &str) -> Self {
        Self {
            distance: distance(a, b),
            ratio: ratio(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names() {
        assert_eq!(distance("Mashhad", "Mashhad"), 0);
        assert_eq!(ratio("Mashhad", "Mashhad"), 1.0);
    }

    #[test]
    fn empty_strings() {
        assert_eq!(distance("", "Rey"), 3);
        assert_eq!(distance("Rey", ""), 3);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("", "Rey"), 0.0);
    }

    #[test]
    fn substitution_counts_twice_in_ratio() {
        assert_eq!(distance("Ray", "Rey"), 1);
        let r = ratio("Ray", "Rey");
        assert!((r - 4.0 / 6.0).abs() < 1e-9, "got {r}");
    }

    #[test]
    fn classic_pair() {
        assert_eq!(distance("kitten", "sitting"), 3);
        // indel distance 5 over 13 characters
        assert!((ratio("kitten", "sitting") - 8.0 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(distance("Tehrān", "Tehran"), 1);
    }
}
