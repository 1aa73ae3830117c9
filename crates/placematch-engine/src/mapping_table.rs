//! Two-column mapping tables on disk.
//!
//! Exported mappings and hand-curated override tables share one layout:
//! an `original_name` column and a `canonical_name` column. Header names are
//! matched case-insensitively and may carry a UTF-8 BOM.

use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use placematch_model::{MatchOrigin, MatchRow, NameMapping};
use tracing::{debug, warn};

use crate::error::{EngineError, Result};

pub const ORIGINAL_COLUMN: &str = "original_name";
pub const CANONICAL_COLUMN: &str = "canonical_name";

/// One data row of a mapping table. Cells are kept verbatim, since raw
/// names may carry stray whitespace or `\r`. `canonical` is empty for names
/// left unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PairRow {
    pub original: String,
    pub canonical: String,
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| EngineError::MissingHeader {
            column: name.to_string(),
        })
}

fn collect_pairs<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<PairRow>> {
    let headers = reader.headers()?.clone();
    let original_idx = find_column(&headers, ORIGINAL_COLUMN)?;
    let canonical_idx = find_column(&headers, CANONICAL_COLUMN)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let original = record.get(original_idx).unwrap_or("");
        if original.trim().is_empty() {
            continue;
        }
        let canonical = record.get(canonical_idx).unwrap_or("");
        rows.push(PairRow {
            original: original.to_string(),
            canonical: if canonical.trim().is_empty() {
                String::new()
            } else {
                canonical.to_string()
            },
        });
    }
    Ok(rows)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

/// Read the rows of a mapping table from any reader.
pub(crate) fn read_pairs<R: Read>(reader: R) -> Result<Vec<PairRow>> {
    collect_pairs(csv_reader(reader))
}

/// Read the rows of a mapping table from a file.
pub(crate) fn read_pairs_from_path(path: &Path) -> Result<Vec<PairRow>> {
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| EngineError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    collect_pairs(reader)
}

fn mapping_from_pairs(rows: Vec<PairRow>) -> NameMapping {
    let mut mapping = NameMapping::new();
    for row in rows {
        if mapping.remove(&row.original).is_some() {
            warn!(original = %row.original, "duplicate mapping row, keeping the last one");
        }
        if row.canonical.is_empty() {
            mapping.insert_unmatched(row.original);
        } else {
            mapping.insert(row.original, row.canonical, MatchOrigin::Imported);
        }
    }
    mapping
}

/// Write `mapping` as `original_name,canonical_name` rows, sorted by
/// original name. Unresolved entries get an empty canonical cell.
pub fn write_mapping_csv<W: Write>(mapping: &NameMapping, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record([ORIGINAL_COLUMN, CANONICAL_COLUMN])?;
    for (original, entry) in mapping.iter() {
        writer.write_record([original.as_str(), entry.canonical.as_deref().unwrap_or("")])?;
    }
    writer.flush()?;
    debug!(entries = mapping.len(), "wrote mapping table");
    Ok(())
}

/// Load a mapping previously written by [`write_mapping_csv`], possibly
/// hand-edited in between. Filled rows come back as
/// [`MatchOrigin::Imported`], empty canonical cells as unresolved.
pub fn read_mapping_csv<R: Read>(reader: R) -> Result<NameMapping> {
    Ok(mapping_from_pairs(read_pairs(reader)?))
}

pub fn write_mapping_file(mapping: &NameMapping, path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_mapping_csv(mapping, file)
}

pub fn read_mapping_file(path: impl AsRef<Path>) -> Result<NameMapping> {
    Ok(mapping_from_pairs(read_pairs_from_path(path.as_ref())?))
}

/// Write the flat match table, one row per source name.
pub fn write_match_table<W: Write>(rows: &[MatchRow], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_case_insensitive_and_bom_tolerant() {
        let data = "\u{feff}Original_Name,CANONICAL_NAME\nRay,Rey\n";
        let rows = read_pairs(data.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![PairRow {
                original: "Ray".to_string(),
                canonical: "Rey".to_string(),
            }]
        );
    }

    #[test]
    fn missing_header_is_an_error() {
        let data = "original_name,target\nRay,Rey\n";
        let err = read_pairs(data.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::MissingHeader { column } if column == CANONICAL_COLUMN));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let data = "original_name,canonical_name\n,\n  ,Rey\nRay,  \n";
        let rows = read_pairs(data.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![PairRow {
                original: "Ray".to_string(),
                canonical: String::new(),
            }]
        );
    }

    #[test]
    fn raw_names_survive_export_and_reload() {
        let mut mapping = NameMapping::new();
        mapping.insert("Yasooj\r", "Yasuj", MatchOrigin::Auto);
        mapping.insert("mashhad ", "Mashhad", MatchOrigin::Exact);
        mapping.insert_unmatched(" Ray");

        let mut out = Vec::new();
        write_mapping_csv(&mapping, &mut out).unwrap();
        let reloaded = read_mapping_csv(out.as_slice()).unwrap();

        assert_eq!(reloaded.pairs(), mapping.pairs());
        assert_eq!(reloaded.canonical("Yasooj\r"), Some("Yasuj"));
        assert_eq!(reloaded.canonical("mashhad "), Some("Mashhad"));
        assert_eq!(reloaded.unresolved(), vec![" Ray"]);
    }

    #[test]
    fn empty_canonical_reads_as_unresolved() {
        let data = "original_name,canonical_name\nRay,\nMashhad,Mashhad\n";
        let mapping = read_mapping_csv(data.as_bytes()).unwrap();
        assert_eq!(mapping.unresolved(), vec!["Ray"]);
        assert_eq!(
            mapping.get("Mashhad").map(|e| e.origin),
            Some(MatchOrigin::Imported)
        );
    }

    #[test]
    fn duplicate_rows_keep_the_last() {
        let data = "original_name,canonical_name\nRay,Rey\nRay,\n";
        let mapping = read_mapping_csv(data.as_bytes()).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.canonical("Ray"), None);
    }

    #[test]
    fn match_table_has_header_row() {
        let rows = vec![MatchRow {
            source_name: "Ray".to_string(),
            name_by_distance: "Rey".to_string(),
            name_by_ratio: "Rey".to_string(),
            distance: 1,
            ratio: 0.5,
            metrics_agree: true,
            matched: None,
        }];
        let mut out = Vec::new();
        write_match_table(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "source_name,name_by_distance,name_by_ratio,distance,ratio,metrics_agree,matched\n\
             Ray,Rey,Rey,1,0.5,true,\n"
        );
    }
}
