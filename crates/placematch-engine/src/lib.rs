#![deny(unsafe_code)]

//! Approximate place-name matching and reconciliation.
//!
//! The pipeline normalizes both name sets, scores every source/target pair
//! by edit distance and similarity ratio, accepts a match automatically
//! only when both metrics pick the same target above a cutoff, and composes
//! the result with manual overrides and exact matches into one
//! [`NameMapping`](placematch_model::NameMapping).
//!
//! ```ignore
//! let report = PlaceMatcher::new(MatchOptions::default()).run(&source, &target)?;
//! let mapping = report.build_mapping(&ReconciliationRegistry::new(), &source);
//! let relabeled = apply(&mapping, &dataset, "county")?;
//! ```

pub mod automatch;
pub mod engine;
pub mod error;
pub mod mapping_table;
pub mod matrix;
pub mod normalize;
pub mod overrides;
pub mod registry;
pub mod similarity;

pub use automatch::{accepted_count, decide, decide_one, match_table};
pub use engine::{MatchOutput, MatchReport, PlaceMatcher};
pub use error::{EngineError, Result};
pub use mapping_table::{
    CANONICAL_COLUMN, ORIGINAL_COLUMN, read_mapping_csv, read_mapping_file, write_mapping_csv,
    write_mapping_file, write_match_table,
};
pub use matrix::{CandidateMatrix, Prefiltered, prefilter_exact};
pub use normalize::{Collision, NormalizedIndex, is_null_token, normalize};
pub use overrides::OverrideTable;
pub use registry::{ApplyStats, ReconciliationRegistry, apply, apply_with_stats, build_mapping};
pub use similarity::{Similarity, distance, ratio};
