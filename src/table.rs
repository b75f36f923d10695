//! Paged tabular view
//!
//! Every array becomes a sequence of 50-row pages. Vectors and flattened
//! arrays produce `(index, value)` rows; matrices produce one row per matrix
//! row showing at most the first 20 columns. Page requests are clamped into
//! `1..=total_pages`, so any integer is a valid request.

use crate::archive::{format_shape, Layout, NamedArray};
use serde::Serialize;
use std::fmt;

/// Fixed page height
pub const ROWS_PER_PAGE: usize = 50;
/// Matrix columns shown in the table; the CSV export is not limited by this
pub const TABLE_MAX_COLUMNS: usize = 20;

/// `max(1, ceil(logical_rows / ROWS_PER_PAGE))`
#[must_use]
pub const fn total_pages(logical_rows: usize) -> usize {
    let pages = logical_rows.div_ceil(ROWS_PER_PAGE);
    if pages == 0 {
        1
    } else {
        pages
    }
}

/// One table row: its leading index and the displayed cell texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub values: Vec<String>,
}

/// One rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePage {
    /// The page actually shown, after clamping
    pub page_number: usize,
    pub total_pages: usize,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    pub shape_info: String,
}

/// Pages over one array; page count is fixed when the pager is built
#[derive(Debug, Clone, Copy)]
pub struct TablePager<'a> {
    array: &'a NamedArray,
    layout: Layout,
    total_pages: usize,
}

impl<'a> TablePager<'a> {
    #[must_use]
    pub fn new(array: &'a NamedArray) -> Self {
        let layout = array.layout();
        Self {
            array,
            layout,
            total_pages: total_pages(layout.logical_rows()),
        }
    }

    /// Pager for a table view whose page count was fixed when it was opened
    #[must_use]
    pub fn resume(array: &'a NamedArray, total_pages: usize) -> Self {
        Self {
            total_pages: total_pages.max(1),
            ..Self::new(array)
        }
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Coerces any requested page number into `1..=total_pages`
    #[must_use]
    pub fn clamp(&self, page: i64) -> usize {
        let last = i64::try_from(self.total_pages).unwrap_or(i64::MAX);
        usize::try_from(page.clamp(1, last)).unwrap_or(1)
    }

    /// Previous/next navigation: moves only if the target page exists
    #[must_use]
    pub fn step(&self, current: usize, delta: i64) -> usize {
        let target = i64::try_from(current)
            .ok()
            .and_then(|c| c.checked_add(delta));
        match target.and_then(|t| usize::try_from(t).ok()) {
            Some(t) if (1..=self.total_pages).contains(&t) => t,
            _ => current,
        }
    }

    /// Header labels for the current layout
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        match self.layout {
            Layout::Matrix { cols, .. } => std::iter::once("Row".to_string())
                .chain((0..cols.min(TABLE_MAX_COLUMNS)).map(|i| format!("Col {i}")))
                .collect(),
            Layout::Vector { .. } | Layout::Flattened { .. } => {
                vec!["Index".to_string(), "Value".to_string()]
            }
        }
    }

    /// Toolbar text describing the array extent
    #[must_use]
    pub fn shape_info(&self) -> String {
        let shape = format_shape(self.array.shape());
        match self.layout {
            Layout::Vector { len } => format!("Shape: {shape} | Elements: {len}"),
            Layout::Matrix { rows, cols } => {
                format!("Shape: {shape} | Rows: {rows}, Columns: {cols}")
            }
            Layout::Flattened { len } => format!(
                "Shape: {shape} | Dimensions: {}, Total Elements: {len}",
                self.array.rank()
            ),
        }
    }

    /// Rows of the clamped page
    #[must_use]
    pub fn page(&self, page: i64) -> TablePage {
        let page_number = self.clamp(page);
        let start = (page_number - 1) * ROWS_PER_PAGE;
        let end = (start + ROWS_PER_PAGE).min(self.layout.logical_rows());
        let data = self.array.data();

        let rows = match self.layout {
            Layout::Matrix { cols, .. } => {
                let shown = cols.min(TABLE_MAX_COLUMNS);
                (start..end)
                    .map(|row| TableRow {
                        index: row,
                        values: data.row_texts(row, shown),
                    })
                    .collect()
            }
            Layout::Vector { .. } | Layout::Flattened { .. } => data
                .flat_texts(start, end.saturating_sub(start))
                .into_iter()
                .enumerate()
                .map(|(offset, value)| TableRow {
                    index: start + offset,
                    values: vec![value],
                })
                .collect(),
        };

        TablePage {
            page_number,
            total_pages: self.total_pages,
            columns: self.columns(),
            rows,
            shape_info: self.shape_info(),
        }
    }
}

impl fmt::Display for TablePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.shape_info)?;
        writeln!(f, "{}", self.columns.join(" | "))?;
        for row in &self.rows {
            writeln!(f, "{} | {}", row.index, row.values.join(" | "))?;
        }
        writeln!(f, "Page {} of {}", self.page_number, self.total_pages)
    }
}
