//! CSV writing of relabeled datasets.

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use placematch_model::{CellValue, Dataset};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Write `dataset` to `path` with one header row. Missing cells are blank.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_dataset_to_writer(dataset, file, path)
}

/// Write CSV to any writer. `origin` labels errors and log lines.
pub fn write_dataset_to_writer<W: Write>(dataset: &Dataset, writer: W, origin: &Path) -> Result<()> {
    let csv_error = |source: csv::Error| IngestError::CsvWrite {
        path: origin.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(&dataset.columns).map_err(csv_error)?;
    for row in &dataset.rows {
        writer
            .write_record(row.iter().map(CellValue::as_field))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| IngestError::FileWrite {
        path: origin.to_path_buf(),
        source,
    })?;
    debug!(path = %origin.display(), rows = dataset.row_count(), "wrote dataset");
    Ok(())
}
