//! Configuration options for place-name matching.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default minimum similarity ratio for an automatic match.
pub const DEFAULT_CUTOFF: f64 = 0.75;

/// Options controlling a matching run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Capitalize names (first letter upper, rest lower) before comparison.
    pub case_fold: bool,

    /// Remove names that already match exactly from both sides before
    /// building the candidate matrix.
    pub unique_only: bool,

    /// Minimum similarity ratio for an automatic match.
    pub cutoff: f64,

    /// Return the flat match table. When false, return the ranked
    /// per-name detail listing instead.
    pub as_table: bool,

    /// Match each source name only against targets sharing its parent region.
    pub scope_by_parent: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_fold: true,
            unique_only: true,
            cutoff: DEFAULT_CUTOFF,
            as_table: true,
            scope_by_parent: false,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with a high cutoff, leaving more names for manual review.
    pub fn strict() -> Self {
        Self {
            cutoff: 0.85,
            ..Self::default()
        }
    }

    /// Options with a low cutoff for exploratory passes.
    pub fn relaxed() -> Self {
        Self {
            cutoff: 0.65,
            ..Self::default()
        }
    }

    pub fn with_case_fold(mut self, enable: bool) -> Self {
        self.case_fold = enable;
        self
    }

    pub fn with_unique_only(mut self, enable: bool) -> Self {
        self.unique_only = enable;
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_as_table(mut self, enable: bool) -> Self {
        self.as_table = enable;
        self
    }

    pub fn with_scope_by_parent(mut self, enable: bool) -> Self {
        self.scope_by_parent = enable;
        self
    }

    /// Check that the cutoff is a finite value in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.cutoff.is_finite() || !(0.0..=1.0).contains(&self.cutoff) {
            return Err(ModelError::InvalidCutoff(self.cutoff));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = MatchOptions::default();
        assert!(options.case_fold);
        assert!(options.unique_only);
        assert!(options.as_table);
        assert!(!options.scope_by_parent);
        assert_eq!(options.cutoff, 0.75);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_cutoff() {
        for cutoff in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let options = MatchOptions::default().with_cutoff(cutoff);
            assert!(options.validate().is_err(), "cutoff {cutoff} accepted");
        }
    }
}
