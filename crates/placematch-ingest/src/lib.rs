//! Dataset ingestion for place-name reconciliation.
//!
//! Loads CSV files into [`Dataset`](placematch_model::Dataset)s, extracts
//! place-name columns as [`NameSet`](placematch_model::NameSet)s, and writes
//! relabeled datasets back out.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use placematch_ingest::{read_dataset, read_name_set, write_dataset};
//!
//! let counties = read_name_set(Path::new("shapefile_counties.csv"), "NAME_2", Some("NAME_1"))?;
//! let cases = read_dataset(Path::new("human_cases.csv"))?;
//! ```

mod csv;
mod error;
mod names;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading and Writing ===
pub use self::csv::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_dataset,
    read_dataset_from_reader, validate_encoding, write_dataset, write_dataset_to_writer,
};

// === Name Columns ===
pub use names::{name_set_from_dataset, read_name_set};
