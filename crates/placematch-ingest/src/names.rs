//! Place-name columns as [`NameSet`]s.

use std::path::Path;

use placematch_model::{Dataset, NameSet, is_null_token};
use tracing::debug;

use crate::csv::read_dataset;
use crate::error::{IngestError, Result};

/// Distinct names of `column`, with `parent_column` as the parent region
/// when given. Missing cells and null tokens are skipped.
pub fn name_set_from_dataset(
    dataset: &Dataset,
    column: &str,
    parent_column: Option<&str>,
) -> Result<NameSet> {
    let name_idx = dataset.column_index(column)?;
    let parent_idx = parent_column
        .map(|parent| dataset.column_index(parent))
        .transpose()?;

    let mut names = NameSet::new();
    let mut skipped = 0usize;
    for row in &dataset.rows {
        let Some(name) = row[name_idx].as_text() else {
            skipped += 1;
            continue;
        };
        if is_null_token(name) {
            skipped += 1;
            continue;
        }
        let parent = parent_idx.and_then(|idx| row[idx].as_text());
        names.insert(name, parent);
    }
    debug!(column, names = names.len(), skipped, "collected name set");
    Ok(names)
}

/// Load a CSV file and collect the names of one column.
pub fn read_name_set(path: &Path, column: &str, parent_column: Option<&str>) -> Result<NameSet> {
    let dataset = read_dataset(path)?;
    name_set_from_dataset(&dataset, column, parent_column).map_err(|err| match err {
        IngestError::ColumnNotFound { column } => IngestError::MissingColumn {
            column,
            path: path.to_path_buf(),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use placematch_model::CellValue;

    fn dataset(rows: &[(&str, &str)]) -> Dataset {
        let mut dataset = Dataset::new(vec!["county".to_string(), "province".to_string()]);
        for (county, province) in rows {
            dataset
                .push_row(vec![CellValue::from_raw(county), CellValue::from_raw(province)])
                .unwrap();
        }
        dataset
    }

    #[test]
    fn test_skips_nulls_and_duplicates() {
        let data = dataset(&[
            ("Ray", "Tehran"),
            ("Null", "Tehran"),
            ("", "Fars"),
            ("Ray", "Tehran"),
            ("Kazerun", "Fars"),
        ]);
        let names = name_set_from_dataset(&data, "county", Some("province")).unwrap();
        let collected: Vec<&str> = names.names().collect();
        assert_eq!(collected, vec!["Ray", "Kazerun"]);
        assert_eq!(names.parent_of("Kazerun"), Some("Fars"));
    }

    #[test]
    fn test_without_parent_column() {
        let data = dataset(&[("Ray", "Tehran")]);
        let names = name_set_from_dataset(&data, "county", None).unwrap();
        assert!(!names.has_parents());
    }

    #[test]
    fn test_unknown_column() {
        let data = dataset(&[("Ray", "Tehran")]);
        let err = name_set_from_dataset(&data, "shahrestan", None).unwrap_err();
        assert!(matches!(err, IngestError::ColumnNotFound { .. }));
    }
}
