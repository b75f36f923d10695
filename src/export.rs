//! CSV export of a whole array
//!
//! The export always carries every element. Matrices keep all their columns
//! even though the table view shows only the first 20.

use crate::archive::{Layout, NamedArray};
use crate::errors::{NpzVisError, Result};
use csv::{Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the CSV form of `array` to `writer`, returning the number of data rows
///
/// # Errors
///
/// Fails only when the underlying writer fails.
pub fn write_csv<W: Write>(array: &NamedArray, writer: W) -> std::result::Result<usize, csv::Error> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    let data = array.data();

    let rows = match array.layout() {
        Layout::Matrix { rows, cols } => {
            wtr.write_record(
                std::iter::once("Row".to_string()).chain((0..cols).map(|i| format!("Col{i}"))),
            )?;
            for row in 0..rows {
                wtr.write_record(
                    std::iter::once(row.to_string()).chain(data.row_texts(row, cols)),
                )?;
            }
            rows
        }
        Layout::Vector { len } | Layout::Flattened { len } => {
            wtr.write_record(["Index", "Value"])?;
            data.try_for_each_text(|i, text| wtr.write_record([i.to_string(), text]))?;
            len
        }
    };

    wtr.flush()?;
    Ok(rows)
}

/// Exports `array` to a CSV file at `path`
///
/// # Errors
///
/// Returns [`NpzVisError::Export`] if the destination cannot be created or written.
pub fn export_csv(array: &NamedArray, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let to_export_error = |source: csv::Error| NpzVisError::Export {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(|e| to_export_error(e.into()))?;
    let rows = write_csv(array, BufWriter::new(file)).map_err(to_export_error)?;
    info!(array = array.name(), path = %path.display(), rows, "exported CSV");
    Ok(rows)
}
