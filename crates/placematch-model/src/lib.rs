#![deny(unsafe_code)]

//! Data model for place-name reconciliation.
//!
//! Value types shared by the matching engine, the CSV ingest layer and the
//! command-line tool: name sets, candidate and decision records, the final
//! name mapping, a simple text table, and matching options.

pub mod candidate;
pub mod error;
pub mod mapping;
pub mod names;
pub mod options;
pub mod table;

pub use candidate::{CandidateMatch, MatchDecision, MatchRow, RankedCandidate};
pub use error::{ModelError, Result};
pub use mapping::{MappingEntry, MatchOrigin, NameMapping};
pub use names::{NULL_TOKENS, NameEntry, NameSet, is_null_token};
pub use options::{DEFAULT_CUTOFF, MatchOptions};
pub use table::{CellValue, Dataset};
