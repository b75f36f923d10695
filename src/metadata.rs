//! Array description and bounded preview
//!
//! [`describe`] produces everything the info panel shows for one array: shape,
//! dtype, the statistics that apply to its size, and a preview of at most 10
//! rows. The rank-2 preview shows a 10×10 corner, narrower than
//! the table view's 20 columns.

use crate::archive::{format_shape, ElementKind, Layout, NamedArray};
use crate::statistics::{StatOperation, Summarize, SummaryStats};
use serde::Serialize;
use std::fmt;

/// Maximum preview rows (and flattened elements)
pub const PREVIEW_ROWS: usize = 10;
/// Maximum preview columns for rank-2 arrays
pub const PREVIEW_COLUMNS: usize = 10;

/// Which preview rendering applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStyle {
    /// `(index, value)` pairs of a vector
    Indexed,
    /// Row label followed by up to [`PREVIEW_COLUMNS`] cells
    Matrix,
    /// `(flat_index, value)` pairs of the row-major flattening
    Flattened,
}

/// One preview line: a leading index and its cell texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub index: usize,
    pub cells: Vec<String>,
}

/// Bounded textual rendering of the start of an array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub style: PreviewStyle,
    /// Number of cells per row
    pub columns: usize,
    pub rows: Vec<PreviewRow>,
    /// Set when any previewed extent exceeds its cap
    pub truncated: bool,
}

/// Structured info-panel contents for one array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayDescription {
    pub name: String,
    pub shape: Vec<usize>,
    pub dtype: String,
    pub element_kind: ElementKind,
    pub stats: SummaryStats,
    pub preview: Preview,
}

/// Describes an array. Never fails: statistics that do not apply are omitted.
#[must_use]
pub fn describe(array: &NamedArray) -> ArrayDescription {
    let stats = array.data().summarize();

    ArrayDescription {
        name: array.name().to_string(),
        shape: array.shape().to_vec(),
        dtype: array.dtype().to_string(),
        element_kind: array.element_kind(),
        stats,
        preview: preview(array),
    }
}

fn preview(array: &NamedArray) -> Preview {
    match array.layout() {
        Layout::Vector { len } => Preview {
            style: PreviewStyle::Indexed,
            columns: 1,
            rows: indexed_rows(array, len),
            truncated: len > PREVIEW_ROWS,
        },
        Layout::Flattened { len } => Preview {
            style: PreviewStyle::Flattened,
            columns: 1,
            rows: indexed_rows(array, len),
            truncated: len > PREVIEW_ROWS,
        },
        Layout::Matrix { rows, cols } => {
            let columns = cols.min(PREVIEW_COLUMNS);
            let preview_rows = (0..rows.min(PREVIEW_ROWS))
                .map(|row| PreviewRow {
                    index: row,
                    cells: (0..columns)
                        .map(|col| matrix_cell(array, row, col))
                        .collect(),
                })
                .collect();
            Preview {
                style: PreviewStyle::Matrix,
                columns,
                rows: preview_rows,
                truncated: rows > PREVIEW_ROWS || cols > PREVIEW_COLUMNS,
            }
        }
    }
}

fn indexed_rows(array: &NamedArray, len: usize) -> Vec<PreviewRow> {
    array
        .data()
        .flat_texts(0, len.min(PREVIEW_ROWS))
        .into_iter()
        .enumerate()
        .map(|(index, text)| PreviewRow {
            index,
            cells: vec![text],
        })
        .collect()
}

/// Integers keep their natural form; floats get 4 decimals cut to 6 chars
fn matrix_cell(array: &NamedArray, row: usize, col: usize) -> String {
    let index = [row, col];
    match array.element_kind() {
        ElementKind::Floating => array
            .data()
            .value_at(&index)
            .map(|v| format!("{v:.4}").chars().take(6).collect())
            .unwrap_or_default(),
        ElementKind::Integer | ElementKind::Other => {
            array.data().text_at(&index).unwrap_or_default()
        }
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            PreviewStyle::Indexed => {
                writeln!(f, "Index | Value")?;
                writeln!(f, "{}", "-".repeat(30))?;
                for row in &self.rows {
                    writeln!(f, "{:5} | {}", row.index, row.cells.join(""))?;
                }
            }
            PreviewStyle::Flattened => {
                writeln!(f, "Flattened view:")?;
                writeln!(f, "{}", "-".repeat(30))?;
                for row in &self.rows {
                    writeln!(f, "[{:3}]: {}", row.index, row.cells.join(""))?;
                }
            }
            PreviewStyle::Matrix => {
                write!(f, "Row |")?;
                for col in 0..self.columns {
                    write!(f, " Col{col} |")?;
                }
                writeln!(f)?;
                writeln!(f, "{}", "-".repeat(8 * self.columns + 6))?;
                for row in &self.rows {
                    write!(f, "{:3} |", row.index)?;
                    for cell in &row.cells {
                        write!(f, " {cell:>5} |")?;
                    }
                    writeln!(f)?;
                }
            }
        }
        if self.truncated {
            writeln!(f, "\n(Showing truncated preview of larger data)")?;
        }
        Ok(())
    }
}

impl fmt::Display for ArrayDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Array: {}", self.name)?;
        writeln!(f, "Shape: {}", format_shape(&self.shape))?;
        writeln!(f, "Type: {}", self.dtype)?;
        for operation in StatOperation::ALL {
            if let Some(value) = self.stats.get(operation) {
                writeln!(f, "{}: {}", operation.label(), value)?;
            }
        }
        writeln!(f, "\nData Preview (First {PREVIEW_ROWS} rows):")?;
        write!(f, "{}", self.preview)
    }
}
