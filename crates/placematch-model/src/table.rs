use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    /// Text cell, or `Missing` when the raw value is blank.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(raw.to_string())
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// Cell contents as written back to a CSV field.
    pub fn as_field(&self) -> &str {
        self.as_text().unwrap_or("")
    }
}

/// A rectangular table of text cells, the unit a mapping is applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of `column`, matched exactly.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| ModelError::ColumnNotFound {
                column: column.to_string(),
            })
    }

    /// Cells of one column, top to bottom.
    pub fn column_values<'a>(
        &'a self,
        column: &str,
    ) -> Result<impl Iterator<Item = &'a CellValue> + use<'a>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn push_row_rejects_wrong_width() {
        let mut dataset = Dataset::new(vec!["County".to_string(), "Cases".to_string()]);
        dataset.push_row(vec![text("Ray"), text("4")]).unwrap();
        let err = dataset.push_row(vec![text("Rey")]).unwrap_err();
        assert_eq!(
            err,
            ModelError::RowWidth {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn column_values_reports_missing_column() {
        let dataset = Dataset::new(vec!["County".to_string()]);
        assert!(matches!(
            dataset.column_values("Province"),
            Err(ModelError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn blank_raw_value_is_missing() {
        assert_eq!(CellValue::from_raw("  "), CellValue::Missing);
        assert_eq!(CellValue::from_raw("Izeh").as_field(), "Izeh");
    }
}
